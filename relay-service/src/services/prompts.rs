//! Prompt templates sent to the model.
//!
//! The wording is part of the product: menus are requested in Traditional
//! Chinese with NT$ prices, everything else in Simplified Chinese.

use crate::models::OrderRequest;

pub const RESTAURANTS_PROMPT: &str = "请生成8家不同类型的餐厅数据，包括餐厅ID、名称、类别、评分(1-5)、评论数量、配送时间和最低订单金额。评分保留一位小数。每家餐厅的图片请使用 picsum.photos 的占位图片 URL。";

pub fn menu_prompt(restaurant_name: &str) -> String {
    format!(
        "请为名为 \"{}\" 的餐厅生成一份包含6个品项的真实菜单。对于每个品项，提供唯一的ID、名称和价格（新台币）。每个品项都应包含餐厅名称以供参考。请使用繁体中文回答。",
        restaurant_name
    )
}

pub fn order_prompt(order: &OrderRequest) -> String {
    format!(
        "一位顾客下了一张美食外送订单。\n顾客资料: {}。\n订单品项: {}。\n请根据这些信息，生成一个唯一的订单编号（格式：ORD-XXXXXX）和一个真实的预计送达时间（例如：25-35 分钟）。",
        order.order_details,
        order.cart_summary()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use serde_json::json;

    #[test]
    fn menu_prompt_quotes_the_name() {
        let prompt = menu_prompt("京都花开寿司");
        assert!(prompt.contains("\"京都花开寿司\""));
        assert!(prompt.contains("6个品项"));
        assert!(prompt.contains("繁体中文"));
    }

    #[test]
    fn order_prompt_embeds_details_and_cart() {
        let order = OrderRequest {
            order_details: json!({ "name": "王小明", "address": "台北市" }),
            cart: vec![
                CartItem::new("经典汉堡", 2),
                CartItem::new("奶昔", 1),
            ],
        };
        let prompt = order_prompt(&order);
        assert!(prompt.contains(r#""name":"王小明""#));
        assert!(prompt.contains(r#""address":"台北市""#));
        assert!(prompt.contains("订单品项: 经典汉堡 x2, 奶昔 x1。"));
        assert!(prompt.contains("ORD-XXXXXX"));
    }
}

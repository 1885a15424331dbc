//! Static payloads served when the model cannot be used.
//!
//! Downstream clients rely on these values staying stable, so they are
//! literal tables rather than generated data.

use crate::models::{MenuItem, OrderConfirmation, Restaurant};
use rand::Rng;

pub const FALLBACK_DELIVERY_TIME: &str = "20-30 分钟";

/// Menu used when no category key matches the restaurant name.
pub const DEFAULT_MENU_CATEGORY: &str = "现代美式料理";

const IMAGE_BASE: &str = "https://picsum.photos/500/300";

/// id, name, category, rating, reviews, delivery time, minimum order
type RestaurantRow = (&'static str, &'static str, &'static str, f64, u32, &'static str, u32);

const RESTAURANTS: [RestaurantRow; 8] = [
    ("1", "炽热电铁板", "现代美式料理", 4.7, 345, "25-35 分钟", 150),
    ("2", "京都花开寿司", "日式料理 & 寿司", 4.9, 512, "30-40 分钟", 200),
    ("3", "意大利面万岁", "义式料理 & 披萨", 4.6, 420, "20-30 分钟", 120),
    ("4", "塔可真好吃", "墨西哥料理 & 塔可", 4.5, 288, "15-25 分钟", 80),
    ("5", "正宗川菜馆", "中式料理", 4.8, 389, "30-40 分钟", 180),
    ("6", "法式甜点屋", "甜点 & 蛋糕", 4.9, 267, "20-30 分钟", 100),
    ("7", "泰式风味", "泰式料理", 4.4, 312, "25-35 分钟", 150),
    ("8", "健康蔬食", "素食 & 健康餐", 4.6, 198, "15-25 分钟", 120),
];

/// Category key to (id, name, price) rows. Only one category is populated;
/// every other restaurant falls through to [`DEFAULT_MENU_CATEGORY`].
const MENUS: &[(&str, &[(&str, &str, u32)])] = &[(
    DEFAULT_MENU_CATEGORY,
    &[
        ("m1", "经典汉堡", 180),
        ("m2", "起司汉堡", 200),
        ("m3", "薯条", 80),
        ("m4", "奶昔", 120),
        ("m5", "洋葱圈", 90),
        ("m6", "招牌沙拉", 150),
    ],
)];

pub fn restaurants() -> Vec<Restaurant> {
    RESTAURANTS
        .iter()
        .map(
            |&(id, name, category, rating, reviews, delivery_time, min_order)| Restaurant {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                rating,
                reviews,
                delivery_time: delivery_time.to_string(),
                min_order,
                image: format!("{}?random={}", IMAGE_BASE, id),
            },
        )
        .collect()
}

/// Pick the first category whose leading whitespace-delimited token appears in
/// the restaurant name.
pub fn menu_category(restaurant_name: &str) -> &'static str {
    MENUS
        .iter()
        .map(|(category, _)| *category)
        .find(|category| {
            let token = category.split_whitespace().next().unwrap_or(*category);
            restaurant_name.contains(token)
        })
        .unwrap_or(DEFAULT_MENU_CATEGORY)
}

pub fn menu(restaurant_name: &str) -> Vec<MenuItem> {
    let category = menu_category(restaurant_name);
    let rows = MENUS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, rows)| *rows)
        .unwrap_or_default();

    rows.iter()
        .map(|&(id, name, price)| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price: f64::from(price),
            restaurant_name: restaurant_name.to_string(),
        })
        .collect()
}

pub fn order_confirmation() -> OrderConfirmation {
    order_confirmation_with(&mut rand::thread_rng())
}

/// `ORD-` plus a uniform six-digit number in 100000..=999999.
pub fn order_confirmation_with<R: Rng + ?Sized>(rng: &mut R) -> OrderConfirmation {
    OrderConfirmation {
        order_number: format!("ORD-{}", rng.gen_range(100_000..=999_999)),
        estimated_delivery_time: FALLBACK_DELIVERY_TIME.to_string(),
    }
}

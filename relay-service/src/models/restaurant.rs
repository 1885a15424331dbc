use crate::services::schema::Schema;
use serde::{Deserialize, Serialize};

/// Number of restaurants requested from the model and served by the fallback.
pub const RESTAURANT_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub category: String,
    /// 1.0 to 5.0, one decimal place.
    pub rating: f64,
    pub reviews: u32,
    /// Free-text range, e.g. "25-35 分钟".
    pub delivery_time: String,
    pub min_order: u32,
    pub image: String,
}

impl Restaurant {
    /// Clamp the rating to one decimal place.
    pub fn normalized(mut self) -> Self {
        self.rating = (self.rating * 10.0).round() / 10.0;
        self
    }
}

/// Envelope the model answers with.
#[derive(Debug, Deserialize)]
pub struct RestaurantList {
    pub restaurants: Vec<Restaurant>,
}

impl RestaurantList {
    pub fn schema() -> Schema {
        Schema::object(vec![(
            "restaurants",
            Schema::array_of(Schema::object(vec![
                ("id", Schema::string().describe("餐厅的唯一识别码。")),
                ("name", Schema::string()),
                ("category", Schema::string()),
                ("rating", Schema::number().between(1.0, 5.0)),
                ("reviews", Schema::integer().at_least(0)),
                ("deliveryTime", Schema::string()),
                ("minOrder", Schema::integer().at_least(0)),
                (
                    "image",
                    Schema::string().describe(
                        "一个来自 picsum.photos 的 URL，例如：https://picsum.photos/500/300",
                    ),
                ),
            ]))
            .exactly(RESTAURANT_COUNT),
        )])
    }
}

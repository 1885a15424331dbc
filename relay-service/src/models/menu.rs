use crate::services::schema::Schema;
use serde::{Deserialize, Serialize};

pub const MENU_ITEM_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub restaurant_name: String,
}

#[derive(Debug, Deserialize)]
pub struct MenuList {
    pub menu: Vec<MenuItem>,
}

impl MenuList {
    pub fn schema() -> Schema {
        Schema::object(vec![(
            "menu",
            Schema::array_of(Schema::object(vec![
                ("id", Schema::string()),
                ("name", Schema::string()),
                ("price", Schema::number().at_least(0)),
                (
                    "restaurantName",
                    Schema::string().describe("此品项所属的餐厅名称。"),
                ),
            ]))
            .exactly(MENU_ITEM_COUNT),
        )])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRequest {
    #[serde(default)]
    pub restaurant_name: Option<String>,
}

impl MenuRequest {
    /// The requested name, if present and non-empty.
    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant_name.as_deref().filter(|name| !name.is_empty())
    }
}

pub mod menu;
pub mod order;
pub mod restaurant;

pub use menu::{MenuItem, MenuList, MenuRequest};
pub use order::{CartItem, OrderConfirmation, OrderRequest, OrderRequestBody};
pub use restaurant::{Restaurant, RestaurantList};

pub mod card;
pub mod category;
pub mod common;
pub mod credit;
pub mod preset;
pub mod wallet;

pub use card::{Card, CardView};
pub use category::CreditCategory;
pub use common::{Displayable, Identifiable};
pub use credit::Credit;
pub use preset::{CardPreset, PresetCredit};
pub use wallet::{Wallet, CURRENT_SCHEMA_VERSION};

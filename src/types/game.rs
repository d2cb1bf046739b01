use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/////////////////////////////////////////////
/// Side
/// /////////////////////////////////////////

/// The role a team plays for a round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Attacking.
    #[default]
    T,
    /// Defending.
    CT,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::T => write!(f, "T"),
            Side::CT => write!(f, "CT"),
        }
    }
}

/////////////////////////////////////////////
/// Inventory
/// /////////////////////////////////////////

pub const WEAPON_CLASS_SMG: &str = "SMG";
pub const WEAPON_CLASS_RIFLE: &str = "Rifle";

/// One carried weapon. Telemetry sometimes leaves the class out;
/// such entries never match a class query.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InventoryItem {
    #[serde(default)]
    pub weapon_name: Option<String>,
    #[serde(default)]
    pub weapon_class: Option<String>,
}

impl InventoryItem {
    pub fn is_class(&self, weapon_class: &str) -> bool {
        self.weapon_class.as_deref() == Some(weapon_class)
    }
}

/// True if any entry is of one of `classes`. A missing inventory holds nothing.
pub fn has_weapon<S: AsRef<str>>(inventory: Option<&[InventoryItem]>, classes: &[S]) -> bool {
    inventory.map_or(false, |items| {
        items.iter().any(|item| classes.iter().any(|c| item.is_class(c.as_ref())))
    })
}

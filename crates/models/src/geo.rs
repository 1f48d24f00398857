use serde::{Deserialize, Serialize};

/// Top-level administrative division (tỉnh/thành phố).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub code: String,
    pub name: String,
}

/// Second-level division (quận/huyện) belonging to one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub code: String,
    pub name: String,
    pub province_code: String,
}

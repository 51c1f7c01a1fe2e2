use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Company size buckets offered by the lead form.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum EmployeeBucket {
    #[serde(rename = "1-10")]
    #[strum(serialize = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    #[strum(serialize = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    #[strum(serialize = "51-200")]
    Medium,
    #[serde(rename = "201-500")]
    #[strum(serialize = "201-500")]
    Large,
    #[serde(rename = "500+")]
    #[strum(serialize = "500+")]
    Enterprise,
}

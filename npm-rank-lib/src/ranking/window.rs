use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Time granularity used to aggregate and rank downloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, ValueEnum, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// The last complete day
    Day,

    /// The last seven complete days
    Week,

    /// The last month of complete days
    #[default]
    Month,
}

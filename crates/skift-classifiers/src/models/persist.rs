use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::TrainOptions;
use crate::models::labels::LabelSet;
use crate::models::selector::InputSelector;

/// The serializable form of an adapter: everything verbatim except the live
/// model, which is replaced by its snapshot bytes (`None` when unfitted).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PersistedClassifier {
    #[serde(flatten)]
    pub selector: InputSelector,
    pub options: TrainOptions,
    pub labels: Option<LabelSet>,
    #[serde(with = "snapshot_base64", default)]
    pub model: Option<Vec<u8>>,
}

mod snapshot_base64 {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        bytes
            .as_ref()
            .map(|b| BASE64_STANDARD.encode(b))
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| BASE64_STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

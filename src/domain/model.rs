use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One leader entry as returned by the leaders endpoint. The source data
/// contains nulls and occasionally missing fields, so nothing is validated
/// and every field is optional. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLeader {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub start_mandate: Option<String>,
    #[serde(default)]
    pub end_mandate: Option<String>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
}

/// A leader after enrichment. `intro_paragraph` exists on every record,
/// possibly null; the only way to build one is [`RawLeader::enrich`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub start_mandate: Option<String>,
    pub end_mandate: Option<String>,
    pub wikipedia_url: Option<String>,
    pub intro_paragraph: Option<String>,
}

impl RawLeader {
    pub fn enrich(self, intro_paragraph: Option<String>) -> Leader {
        Leader {
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            start_mandate: self.start_mandate,
            end_mandate: self.end_mandate,
            wikipedia_url: self.wikipedia_url,
            intro_paragraph,
        }
    }
}

/// Country code → leaders, in the order countries were fetched.
pub type RawLeadersByCountry = IndexMap<String, Vec<RawLeader>>;
pub type LeadersByCountry = IndexMap<String, Vec<Leader>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

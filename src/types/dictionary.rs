use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dictionaries managed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryType {
    Stopwords,
    Plurals,
    Compounds,
}

impl DictionaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryType::Stopwords => "stopwords",
            DictionaryType::Plurals => "plurals",
            DictionaryType::Compounds => "compounds",
        }
    }

    /// Attributes every entry of this dictionary must carry, checked in order.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DictionaryType::Stopwords => &["objectID", "word"],
            DictionaryType::Plurals => &["objectID", "words"],
            DictionaryType::Compounds => &["objectID", "word", "decomposition"],
        }
    }
}

impl std::fmt::Display for DictionaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DictionaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stopwords" => Ok(DictionaryType::Stopwords),
            "plurals" => Ok(DictionaryType::Plurals),
            "compounds" => Ok(DictionaryType::Compounds),
            _ => Err(format!("unknown dictionary: {}", s)),
        }
    }
}

/// Standard entries turned off per language. `None` for `stopwords` resets
/// every language to the platform default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardEntries {
    pub stopwords: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionarySettings {
    #[serde(default)]
    pub disable_standard_entries: StandardEntries,
}

impl DictionarySettings {
    /// Settings that restore the default standard entries.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Settings disabling (`true`) or enabling (`false`) standard entries.
    pub fn with_stopwords(stopwords: BTreeMap<String, bool>) -> Self {
        Self {
            disable_standard_entries: StandardEntries {
                stopwords: Some(stopwords),
            },
        }
    }
}

/// A dictionary entry is kept as the raw JSON object read from the file.
pub type DictionaryEntry = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DictionaryAction {
    AddEntry,
    DeleteEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct DictionaryBatchRequest {
    pub action: DictionaryAction,
    pub body: DictionaryEntry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryBatchParams {
    pub clear_existing_dictionary_entries: bool,
    pub requests: Vec<DictionaryBatchRequest>,
}

/// Language codes with a standard stop words dictionary, with display names.
pub const LANGUAGES_WITH_STOPWORDS: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("az", "Azeri"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Farsi"),
    ("fi", "Finnish"),
    ("fo", "Faroese"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("ku", "Kurdish"),
    ("ky", "Kirghiz"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mi", "Maori"),
    ("mn", "Mongolian"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("nb", "Norwegian Bokmål"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("ns", "Northern Sotho"),
    ("pl", "Polish"),
    ("ps", "Pashto"),
    ("pt", "Portuguese"),
    ("pt-br", "Brazilian Portuguese"),
    ("qu", "Quechua"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tn", "Tswana"),
    ("tr", "Turkish"),
    ("tt", "Tatar"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("zh", "Chinese"),
];

pub fn has_stopwords_support(language: &str) -> bool {
    LANGUAGES_WITH_STOPWORDS
        .iter()
        .any(|(code, _)| *code == language)
}

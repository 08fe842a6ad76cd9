//! Defines the remote CSV resources that make up the PRSA air-quality dataset
//! and how a city label is derived from each resource name.

use std::fmt;

/// Base URL under which the PRSA CSV files are published.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/marceloreis/HTI/master/PRSA_Data_20130301-20170228";

/// The twelve monitoring sites of the PRSA dataset, in load order.
pub const DEFAULT_RESOURCE_NAMES: [&str; 12] = [
    "PRSA_Data_Aotizhongxin_20130301-20170228.csv",
    "PRSA_Data_Changping_20130301-20170228.csv",
    "PRSA_Data_Dongsi_20130301-20170228.csv",
    "PRSA_Data_Gucheng_20130301-20170228.csv",
    "PRSA_Data_Nongzhanguan_20130301-20170228.csv",
    "PRSA_Data_Tiantan_20130301-20170228.csv",
    "PRSA_Data_Wanliu_20130301-20170228.csv",
    "PRSA_Data_Dingling_20130301-20170228.csv",
    "PRSA_Data_Guanyuan_20130301-20170228.csv",
    "PRSA_Data_Huairou_20130301-20170228.csv",
    "PRSA_Data_Shunyi_20130301-20170228.csv",
    "PRSA_Data_Wanshouxigong_20130301-20170228.csv",
];

/// Position of the city token in an underscore-split resource name.
const CITY_TOKEN_INDEX: usize = 2;

/// A single CSV file of the dataset, identified by its file name.
///
/// The city label of a resource is the third `_`-delimited token of its name,
/// so `PRSA_Data_Dongsi_20130301-20170228.csv` belongs to `Dongsi`.
///
/// # Examples
///
/// ```
/// use air_quality::Resource;
///
/// let resource = Resource::new("PRSA_Data_Dongsi_20130301-20170228.csv");
/// assert_eq!(resource.city(), Some("Dongsi"));
/// assert_eq!(
///     resource.url("https://example.org/data/"),
///     "https://example.org/data/PRSA_Data_Dongsi_20130301-20170228.csv"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    name: String,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The file name this resource was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The city label encoded in the file name, if the name has enough tokens.
    pub fn city(&self) -> Option<&str> {
        self.name
            .split('_')
            .nth(CITY_TOKEN_INDEX)
            .filter(|token| !token.is_empty())
    }

    /// Joins the file name onto `base_url`, tolerating a trailing slash.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.name)
    }

    /// The twelve PRSA resources in their fixed load order.
    pub fn defaults() -> Vec<Resource> {
        DEFAULT_RESOURCE_NAMES
            .iter()
            .map(|name| Resource::new(*name))
            .collect()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Resource {
    fn from(name: &str) -> Self {
        Resource::new(name)
    }
}

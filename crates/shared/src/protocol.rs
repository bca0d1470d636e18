use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use url::Url;

use crate::domain::KeywordList;

pub const SCRAPE_JOBS_PATH: &str = "/scrape-jobs";
pub const MAX_JOBS_PER_KEYWORD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeJobsRequest {
    pub keywords: KeywordList,
    pub max_jobs_per_keyword: u32,
}

impl ScrapeJobsRequest {
    pub fn new(keywords: KeywordList) -> Self {
        Self {
            keywords,
            max_jobs_per_keyword: MAX_JOBS_PER_KEYWORD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeJobsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<JobPosting>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies_by_keyword: CompanyGroups,
}

/// One job listing, tagged with the keyword that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub keyword: String,
    #[serde(
        default,
        deserialize_with = "lenient_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_link: Option<Url>,
    #[serde(
        default,
        deserialize_with = "lenient_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_link: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
}

/// Keyword to hiring-company roll-up, kept in the order the service sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyGroups {
    entries: Vec<(String, Vec<String>)>,
}

impl CompanyGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword group. A keyword seen before keeps its position and only
    /// gains the companies it did not already list.
    pub fn insert<K, I, C>(&mut self, keyword: K, companies: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let keyword = keyword.into();
        let companies = companies.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some((_, existing)) => {
                for company in companies {
                    if !existing.contains(&company) {
                        existing.push(company);
                    }
                }
            }
            None => self.entries.push((keyword, companies.collect())),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, companies)| companies.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(keyword, companies)| (keyword.as_str(), companies.as_slice()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(keyword, _)| keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V, C> FromIterator<(K, V)> for CompanyGroups
where
    K: Into<String>,
    V: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut groups = Self::new();
        for (keyword, companies) in iter {
            groups.insert(keyword, companies);
        }
        groups
    }
}

impl Serialize for CompanyGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, companies) in &self.entries {
            map.serialize_entry(keyword, companies)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompanyGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = CompanyGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keyword to company names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = CompanyGroups::new();
                while let Some((keyword, companies)) =
                    access.next_entry::<String, Option<Vec<String>>>()?
                {
                    groups.insert(keyword, companies.unwrap_or_default());
                }
                Ok(groups)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Blank or relative links are dropped rather than failing the whole response.
fn lenient_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .and_then(|link| Url::parse(link).ok()))
}

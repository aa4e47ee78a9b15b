use color_eyre::{eyre::bail, Result};
use serde::Deserialize;

use crate::names;

/// A current student willing to talk about one program.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub name: String,
    pub details: String,
    pub avatar: String,
    pub contact_link: String,
}

/// Composite directory key for a school + program pair.
pub fn mentor_key(school: &str, program: &str) -> String {
    format!("{school}_{program}")
}

// ---------------------------------------------------------------------------
// MentorDirectory trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait MentorDirectory: Send + Sync {
    fn program_mentors(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Mentor>>> + Send;
}

#[derive(Clone)]
pub struct HttpMentorDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMentorDirectory {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl MentorDirectory for HttpMentorDirectory {
    async fn program_mentors(&self, key: &str) -> Result<Vec<Mentor>> {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            names::PROGRAM_MENTORS_API_PATH,
            urlencoding::encode(key)
        );
        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            bail!("mentor directory returned {}", resp.status());
        }

        Ok(resp.json().await?)
    }
}

// ---------------------------------------------------------------------------
// MentorService
// ---------------------------------------------------------------------------

pub struct MentorService<D: MentorDirectory = HttpMentorDirectory> {
    directory: D,
}

impl<D: MentorDirectory + Clone> Clone for MentorService<D> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}

impl<D: MentorDirectory> MentorService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Look up mentors for a selected match. This never blocks the detail
    /// view: any failure (transport, bad status, bad payload) degrades to
    /// an empty list and the view renders its "no mentors yet" state.
    pub async fn fetch_mentors(&self, school: &str, program: &str) -> Vec<Mentor> {
        let key = mentor_key(school, program);
        match self.directory.program_mentors(&key).await {
            Ok(mentors) => {
                tracing::debug!("{} mentors for '{key}'", mentors.len());
                mentors
            }
            Err(e) => {
                tracing::warn!("mentor lookup failed for '{key}': {e}");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_mentor() -> Mentor {
        Mentor {
            name: "Ada".to_string(),
            details: "3rd year, loves robotics".to_string(),
            avatar: "/static/img/ada.png".to_string(),
            contact_link: "https://example.com/ada".to_string(),
        }
    }

    #[test]
    fn composite_key_joins_school_and_program() {
        assert_eq!(
            mentor_key("Waterloo", "Software Engineering"),
            "Waterloo_Software Engineering"
        );
    }

    #[test]
    fn composite_key_is_url_encoded_as_one_segment() {
        let key = mentor_key("Waterloo", "Software Engineering");
        assert_eq!(
            urlencoding::encode(&key),
            "Waterloo_Software%20Engineering"
        );
    }

    #[tokio::test]
    async fn successful_lookup_replaces_the_list() {
        let mut mock = MockMentorDirectory::new();
        mock.expect_program_mentors()
            .withf(|key| key == "Waterloo_Software Engineering")
            .returning(|_| Box::pin(async { Ok(vec![sample_mentor()]) }));

        let svc = MentorService::new(mock);
        let mentors = svc.fetch_mentors("Waterloo", "Software Engineering").await;

        assert_eq!(mentors.len(), 1);
        assert_eq!(mentors[0].name, "Ada");
    }

    #[tokio::test]
    async fn empty_directory_result_is_valid() {
        let mut mock = MockMentorDirectory::new();
        mock.expect_program_mentors()
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let svc = MentorService::new(mock);
        let mentors = svc.fetch_mentors("Brock", "History").await;

        assert!(mentors.is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_empty() {
        let mut mock = MockMentorDirectory::new();
        mock.expect_program_mentors()
            .returning(|_| Box::pin(async { Err(color_eyre::eyre::eyre!("503")) }));

        let svc = MentorService::new(mock);
        let mentors = svc.fetch_mentors("Brock", "History").await;

        assert!(mentors.is_empty());
    }
}

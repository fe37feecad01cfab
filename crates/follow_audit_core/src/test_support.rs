//! In-memory `UserDirectory` used by the unit tests.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use async_trait::async_trait;
use github_client::{Error, LoginCase, UserDetails, UserDirectory};

/// A scripted reply for a detail lookup.
pub enum DetailReply {
    Repos(u64),
    MissingField,
    Transport,
    Status(u16),
}

#[derive(Default)]
pub struct FakeDirectory {
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub followers_error: Option<fn() -> Error>,
    pub following_error: Option<fn() -> Error>,
    pub details: HashMap<String, DetailReply>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn with_lists(followers: &[&str], following: &[&str]) -> Self {
        Self {
            followers: followers.iter().map(|s| s.to_string()).collect(),
            following: following.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, login: &str, reply: DetailReply) -> Self {
        self.details.insert(login.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn list_followers(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        self.record(format!("followers:{identity}"));
        if let Some(make_error) = self.followers_error {
            return Err(make_error());
        }
        Ok(self.followers.iter().map(|l| case.apply(l)).collect())
    }

    async fn list_following(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        self.record(format!("following:{identity}"));
        if let Some(make_error) = self.following_error {
            return Err(make_error());
        }
        Ok(self.following.iter().map(|l| case.apply(l)).collect())
    }

    async fn get_user_details(&self, login: &str) -> Result<UserDetails, Error> {
        self.record(format!("details:{login}"));
        match self.details.get(login) {
            Some(DetailReply::Repos(count)) => Ok(UserDetails {
                login: login.to_string(),
                public_repos: Some(*count),
            }),
            Some(DetailReply::MissingField) => Ok(UserDetails {
                login: login.to_string(),
                public_repos: None,
            }),
            Some(DetailReply::Transport) => {
                Err(Error::Transport("connection reset by peer".to_string()))
            }
            Some(DetailReply::Status(code)) => Err(Error::UnexpectedStatus {
                code: *code,
                body: String::new(),
            }),
            None => Err(Error::UnexpectedStatus {
                code: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            }),
        }
    }
}

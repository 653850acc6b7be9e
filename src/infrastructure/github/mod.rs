//! GitHub API client.

mod client;
mod dto;

pub use client::{GITHUB_API_BASE, GithubClient, GithubClientError};

//! # GitHub REST Client
//!
//! [`GitHubClient`] implements [`RepositoryHost`] against the GitHub REST v3
//! API using a blocking `reqwest` client. Calls are issued one at a time and
//! never retried.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | authenticated identity | `GET /user` |
//! | repository exists | `GET /repos/{owner}/{repo}` |
//! | create repository | `POST /user/repos` |
//! | delete repository | `DELETE /repos/{owner}/{repo}` |
//! | add collaborator | `PUT /repos/{owner}/{repo}/collaborators/{user}` |
//! | remove collaborator | `DELETE /repos/{owner}/{repo}/collaborators/{user}` |
//! | list collaborators | `GET /repos/{owner}/{repo}/collaborators` |
//!
//! Non-success responses become [`Error::Host`] carrying the status code and
//! the `message` field of GitHub's error body when it has one.

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::HostConfig;
use crate::error::{Error, Result};
use crate::host::{NewRepository, Permission, RepoLocation, RepoLookup, RepositoryHost};
use crate::identity::Identity;

const USER_AGENT: &str = concat!("collab-sync/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: &str = "100";

#[derive(Deserialize)]
struct Account {
    login: String,
}

#[derive(Deserialize)]
struct CreatedRepository {
    full_name: String,
    html_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// A GitHub API client bound to one token.
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &HostConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token: config.token.expose().to_string(),
        })
    }

    /// Appends path segments to the API base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.api_url, segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn repo_url(&self, owner: &Identity, name: &str, rest: &[&str]) -> Result<Url> {
        let mut segments = vec!["repos", owner.as_str(), name];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }
}

impl RepositoryHost for GitHubClient {
    fn authenticated_identity(&self) -> Result<Identity> {
        let url = self.endpoint(&["user"])?;
        let response = check("get authenticated user", self.request(Method::GET, url).send()?)?;
        let account: Account = response.json()?;
        Identity::new(&account.login).ok_or_else(|| Error::Host {
            operation: "get authenticated user".to_string(),
            status: None,
            message: "response carried an empty login".to_string(),
        })
    }

    fn repository_exists(&self, owner: &Identity, name: &str) -> Result<RepoLookup> {
        let url = self.repo_url(owner, name, &[])?;
        let response = self.request(Method::GET, url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(RepoLookup::NotFound);
        }
        check("check repository", response)?;
        Ok(RepoLookup::Found)
    }

    fn create_repository(&self, repo: &NewRepository) -> Result<RepoLocation> {
        let url = self.endpoint(&["user", "repos"])?;
        let response = check(
            "create repository",
            self.request(Method::POST, url).json(repo).send()?,
        )?;
        let created: CreatedRepository = response.json()?;
        Ok(RepoLocation {
            full_name: created.full_name,
            html_url: created.html_url,
        })
    }

    fn delete_repository(&self, owner: &Identity, name: &str) -> Result<()> {
        let url = self.repo_url(owner, name, &[])?;
        check("delete repository", self.request(Method::DELETE, url).send()?)?;
        Ok(())
    }

    fn add_collaborator(
        &self,
        owner: &Identity,
        name: &str,
        user: &Identity,
        permission: Permission,
    ) -> Result<()> {
        let url = self.repo_url(owner, name, &["collaborators", user.as_str()])?;
        let body = json!({ "permission": permission });
        check(
            "add collaborator",
            self.request(Method::PUT, url).json(&body).send()?,
        )?;
        Ok(())
    }

    fn remove_collaborator(&self, owner: &Identity, name: &str, user: &Identity) -> Result<()> {
        let url = self.repo_url(owner, name, &["collaborators", user.as_str()])?;
        check(
            "remove collaborator",
            self.request(Method::DELETE, url).send()?,
        )?;
        Ok(())
    }

    fn list_collaborators(&self, owner: &Identity, name: &str) -> Result<Vec<Identity>> {
        let mut url = self.repo_url(owner, name, &["collaborators"])?;
        url.query_pairs_mut().append_pair("per_page", PAGE_SIZE);

        let mut collaborators = Vec::new();
        let mut next = Some(url);
        while let Some(page) = next.take() {
            let response = check(
                "list collaborators",
                self.request(Method::GET, page).send()?,
            )?;
            next = next_page(response.headers())?;
            let accounts: Vec<Account> = response.json()?;
            collaborators.extend(accounts.iter().filter_map(|a| Identity::new(&a.login)));
        }
        Ok(collaborators)
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turns a non-success response into a host error.
fn check(operation: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "unexpected response".to_string());

    Err(Error::Host {
        operation: operation.to_string(),
        status: Some(status.as_u16()),
        message,
    })
}

/// Extracts the `rel="next"` target from a `Link` header, if any.
fn next_page(headers: &HeaderMap) -> Result<Option<Url>> {
    let Some(link) = headers.get(LINK) else {
        return Ok(None);
    };
    let link = link.to_str().map_err(|_| Error::Host {
        operation: "list collaborators".to_string(),
        status: None,
        message: "Link header is not valid text".to_string(),
    })?;
    parse_next_link(link)
}

fn parse_next_link(link: &str) -> Result<Option<Url>> {
    for part in link.split(',') {
        let mut pieces = part.split(';').map(str::trim);
        let Some(target) = pieces.next() else {
            continue;
        };
        if pieces.any(|param| param == r#"rel="next""#) {
            let target = target.trim_start_matches('<').trim_end_matches('>');
            return Ok(Some(Url::parse(target)?));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_on_public_api() {
        let base = Url::parse("https://api.github.com").unwrap();
        let url = endpoint(&base, &["repos", "octocat", "hello-world"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/octocat/hello-world");
    }

    #[test]
    fn test_endpoint_keeps_enterprise_prefix() {
        let base = Url::parse("https://ghe.example.com/api/v3").unwrap();
        let url = endpoint(&base, &["user", "repos"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/user/repos");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("https://api.github.com/").unwrap();
        let url = endpoint(&base, &["repos", "me", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/me/a%2Fb%20c");
    }

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://api.github.com/repositories/1/collaborators?per_page=100&page=2>; rel="next", <https://api.github.com/repositories/1/collaborators?per_page=100&page=3>; rel="last""#;
        let next = parse_next_link(header).unwrap().unwrap();
        assert_eq!(next.query(), Some("per_page=100&page=2"));
    }

    #[test]
    fn test_parse_next_link_last_page() {
        let header = r#"<https://api.github.com/repositories/1/collaborators?page=1>; rel="prev", <https://api.github.com/repositories/1/collaborators?page=1>; rel="first""#;
        assert!(parse_next_link(header).unwrap().is_none());
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = HostConfig::resolve(Some("token".to_string()), None).unwrap();
        let client = GitHubClient::new(&config).unwrap();
        let owner = Identity::new("octocat").unwrap();
        let url = client
            .repo_url(&owner, "hello", &["collaborators", "bob"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octocat/hello/collaborators/bob"
        );
    }

    mod http {
        use super::*;
        use mockito::{Matcher, Server};

        fn client(server: &Server) -> GitHubClient {
            let config = HostConfig::resolve(Some("t0ken".to_string()), Some(server.url())).unwrap();
            GitHubClient::new(&config).unwrap()
        }

        fn me() -> Identity {
            Identity::new("me").unwrap()
        }

        #[test]
        fn test_repository_exists_sends_auth_headers() {
            let mut server = Server::new();
            let mock = server
                .mock("GET", "/repos/me/squad")
                .match_header("authorization", "Bearer t0ken")
                .match_header("accept", "application/vnd.github+json")
                .match_header("x-github-api-version", API_VERSION)
                .with_status(200)
                .with_body("{}")
                .create();

            let lookup = client(&server).repository_exists(&me(), "squad").unwrap();

            assert_eq!(lookup, RepoLookup::Found);
            mock.assert();
        }

        #[test]
        fn test_repository_exists_404_is_not_found() {
            let mut server = Server::new();
            let _mock = server
                .mock("GET", "/repos/me/squad")
                .with_status(404)
                .with_body(r#"{"message":"Not Found"}"#)
                .create();

            let lookup = client(&server).repository_exists(&me(), "squad").unwrap();

            assert_eq!(lookup, RepoLookup::NotFound);
        }

        #[test]
        fn test_repository_exists_500_is_an_error() {
            let mut server = Server::new();
            let _mock = server
                .mock("GET", "/repos/me/squad")
                .with_status(500)
                .with_body(r#"{"message":"Server Error"}"#)
                .create();

            let err = client(&server)
                .repository_exists(&me(), "squad")
                .unwrap_err();

            assert!(matches!(err, Error::Host { status: Some(500), .. }));
            assert_eq!(
                err.to_string(),
                "check repository failed (HTTP 500): Server Error"
            );
        }

        #[test]
        fn test_error_without_json_body_uses_reason_phrase() {
            let mut server = Server::new();
            let _mock = server
                .mock("DELETE", "/repos/me/squad")
                .with_status(403)
                .with_body("denied")
                .create();

            let err = client(&server)
                .delete_repository(&me(), "squad")
                .unwrap_err();

            assert!(matches!(err, Error::Host { status: Some(403), .. }));
            assert!(err.to_string().contains("Forbidden"));
        }

        #[test]
        fn test_list_collaborators_follows_next_link() {
            let mut server = Server::new();
            let next = format!(
                "<{}/repos/me/squad/collaborators?per_page=100&page=2>; rel=\"next\"",
                server.url()
            );
            let first = server
                .mock("GET", "/repos/me/squad/collaborators")
                .match_query(Matcher::Exact("per_page=100".to_string()))
                .with_status(200)
                .with_header("link", &next)
                .with_body(r#"[{"login":"alice"},{"login":"me"}]"#)
                .create();
            let second = server
                .mock("GET", "/repos/me/squad/collaborators")
                .match_query(Matcher::UrlEncoded("page".to_string(), "2".to_string()))
                .with_status(200)
                .with_body(r#"[{"login":"Carol"}]"#)
                .create();

            let collaborators = client(&server)
                .list_collaborators(&me(), "squad")
                .unwrap();

            let logins: Vec<&str> = collaborators.iter().map(Identity::as_str).collect();
            assert_eq!(logins, vec!["alice", "me", "Carol"]);
            first.assert();
            second.assert();
        }

        #[test]
        fn test_add_collaborator_sends_permission() {
            let mut server = Server::new();
            let mock = server
                .mock("PUT", "/repos/me/squad/collaborators/alice")
                .match_body(Matcher::Json(json!({ "permission": "push" })))
                .with_status(201)
                .create();

            client(&server)
                .add_collaborator(&me(), "squad", &Identity::new("alice").unwrap(), Permission::Push)
                .unwrap();

            mock.assert();
        }

        #[test]
        fn test_remove_collaborator_failure_carries_message() {
            let mut server = Server::new();
            let _mock = server
                .mock("DELETE", "/repos/me/squad/collaborators/bob")
                .with_status(422)
                .with_body(r#"{"message":"nope"}"#)
                .create();

            let err = client(&server)
                .remove_collaborator(&me(), "squad", &Identity::new("bob").unwrap())
                .unwrap_err();

            assert_eq!(err.to_string(), "remove collaborator failed (HTTP 422): nope");
        }

        #[test]
        fn test_create_repository_posts_body() {
            let mut server = Server::new();
            let mock = server
                .mock("POST", "/user/repos")
                .match_body(Matcher::Json(json!({ "name": "squad", "private": true })))
                .with_status(201)
                .with_body(
                    r#"{"full_name":"me/squad","html_url":"https://github.com/me/squad"}"#,
                )
                .create();

            let location = client(&server)
                .create_repository(&NewRepository::private("squad"))
                .unwrap();

            assert_eq!(location.full_name, "me/squad");
            assert_eq!(location.html_url, "https://github.com/me/squad");
            mock.assert();
        }

        #[test]
        fn test_authenticated_identity_reads_login() {
            let mut server = Server::new();
            let _mock = server
                .mock("GET", "/user")
                .with_status(200)
                .with_body(r#"{"login":"OctoCat","id":1}"#)
                .create();

            let owner = client(&server).authenticated_identity().unwrap();

            assert_eq!(owner.as_str(), "OctoCat");
        }
    }
}

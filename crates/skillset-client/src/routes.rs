//! Fixed service routes and request-target construction.

use reqwest::Url;
use skillset::SkillSetError;

pub const SKILL_INVOCATIONS: &str = "/skill-invocations";
pub const SKILLS: &str = "/skills";
pub const CONTEXT: &str = "/context";

// Requests are dialed over the Unix socket; the host is a placeholder.
const BASE: &str = "http://localhost";

/// Builds `path?k=v&...` with form-urlencoded parameters (space becomes `+`).
///
/// Parameter order is preserved.
pub fn target(path: &str, params: &[(&str, &str)]) -> Result<String, SkillSetError> {
    let mut url = Url::parse(BASE)
        .and_then(|base| base.join(path))
        .map_err(|e| SkillSetError::unexpected(format!("invalid route {path:?}: {e}")))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    })
}

/// Resolves a target built by [`target`] into the absolute URL sent over the socket.
pub fn url(target: &str) -> Result<Url, SkillSetError> {
    Url::parse(BASE)
        .and_then(|base| base.join(target))
        .map_err(|e| SkillSetError::unexpected(format!("invalid request target {target:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_params_yields_bare_path() {
        assert_eq!(target(SKILL_INVOCATIONS, &[]).unwrap(), "/skill-invocations");
    }

    #[test]
    fn session_query() {
        assert_eq!(
            target(SKILLS, &[("session_id", "s1")]).unwrap(),
            "/skills?session_id=s1"
        );
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let got = target(
            CONTEXT,
            &[
                ("session_id", "s1"),
                ("invocation_id", "i&1"),
                ("name", "ctx-name with space"),
            ],
        )
        .unwrap();
        assert_eq!(
            got,
            "/context?session_id=s1&invocation_id=i%261&name=ctx-name+with+space"
        );
    }

    #[test]
    fn url_keeps_the_encoded_query() {
        let target = target(CONTEXT, &[("name", "a b&c")]).unwrap();
        let url = url(&target).unwrap();
        assert_eq!(url.as_str(), "http://localhost/context?name=a+b%26c");
        assert_eq!(url.path(), CONTEXT);
    }
}

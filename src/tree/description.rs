use super::Step;
use crate::ConfigurationError;

lazy_static::lazy_static! {
    static ref DESCRIPTION: regex::Regex = regex::Regex::new(
        r"^(?i:(GET|HEAD|POST|PUT|DELETE|TRACE|OPTIONS|PATCH|CONNECT))\s(/.*)$"
    ).unwrap();
}

/// Converts a route description (e.g. `"GET /users/:id"`) into a chain of
/// steps, the last of which carries the method and the action.
pub(crate) fn parse<A>(description: &str, action: A) -> Result<Step<A>, ConfigurationError> {
    let captures = DESCRIPTION
        .captures(description)
        .ok_or_else(|| ConfigurationError::InvalidDescription(description.to_owned()))?;

    let mut step = Step::action(&captures[1], action)?;

    for segment in segments(&captures[2]).into_iter().rev() {
        let parent = match segment.strip_prefix(':') {
            Some(name) => Step::parameter(name)?,
            None => Step::segment(segment),
        };
        step = parent.append(step);
    }

    Ok(step)
}

/// Strips one leading and one trailing slash, and splits the rest.  The
/// root path has no segments at all, but empty segments elsewhere are kept.
fn segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        vec![]
    } else {
        path.split('/').collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn shape(step: &Step<u32>) -> Vec<String> {
        let mut out = vec![];
        let mut current = Some(step);
        while let Some(step) = current {
            if let Some(segment) = step.segment_str() {
                out.push(format!("seg({})", segment));
            }
            if let Some(name) = step.parameter_name() {
                out.push(format!("param({})", name));
            }
            if let Some(method) = step.method() {
                out.push(format!("method({})", method));
            }
            assert!(step.children().len() <= 1);
            current = step.children().first();
        }
        out
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/"), Vec::<&str>::new());
        assert_eq!(segments("//"), Vec::<&str>::new());
        assert_eq!(segments("/a"), vec!["a"]);
        assert_eq!(segments("/a/"), vec!["a"]);
        assert_eq!(segments("/a//b"), vec!["a", "", "b"]);
        assert_eq!(segments("///"), vec!["", ""]);
    }

    #[test]
    fn test_root() {
        let step = parse("GET /", 1).unwrap();
        assert_eq!(shape(&step), vec!["method(GET)"]);
    }

    #[test]
    fn test_chain() {
        let step = parse("post /users/:id/edit", 1).unwrap();
        assert_eq!(
            shape(&step),
            vec!["seg(users)", "param(id)", "seg(edit)", "method(POST)"]
        );
    }

    #[test]
    fn test_invalid_descriptions() {
        for description in [
            "",
            "GET",
            "GET users",
            "GETX /users",
            "FETCH /users",
            " GET /users",
            "GET  /users",
        ] {
            assert_eq!(
                parse(description, 1).unwrap_err(),
                ConfigurationError::InvalidDescription(description.to_owned()),
                "{:?}",
                description
            );
        }
    }

    #[test]
    fn test_empty_parameter() {
        assert_eq!(
            parse("GET /users/:", 1).unwrap_err(),
            ConfigurationError::EmptyParameter
        );
    }
}

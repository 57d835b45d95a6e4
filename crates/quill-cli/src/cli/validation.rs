/// `KEY=VALUE` assignments given with `--env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignments(pub Vec<String>);

/// Parse a whitespace separated list of `KEY=VALUE` assignments.
///
/// # Examples
///
/// Valid: `OS=linux`, `OS=linux ARCH=amd64`, `EMPTY=`
/// Invalid: `OS`, `=linux`, ``
///
/// # Errors
///
/// Returns an error message naming the first malformed assignment.
pub fn parse_env(s: &str) -> Result<EnvAssignments, String> {
    let assignments: Vec<String> = s.split_whitespace().map(str::to_string).collect();
    if assignments.is_empty() {
        return Err("Environment assignments cannot be empty".to_string());
    }
    for assignment in &assignments {
        parse_env_assignment(assignment)?;
    }
    Ok(EnvAssignments(assignments))
}

/// Split one `KEY=VALUE` assignment.
pub fn parse_env_assignment(assignment: &str) -> Result<(String, String), String> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.is_empty() && !key.contains(char::is_whitespace) => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!(
            "Environment assignment must look like KEY=VALUE: '{}'",
            assignment
        )),
    }
}

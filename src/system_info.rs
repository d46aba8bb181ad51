use git_version::git_version;

const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

fn version_label(release: &str, latest: &str, ahead: &str) -> String {
    match (release, latest, ahead) {
        (tag, _, _) if !tag.is_empty() => format!("release {tag}"),
        (_, "", _) => "development".to_string(),
        (_, latest, "") => format!("development ahead of {latest}"),
        (_, latest, ahead) => format!("development, {ahead} commits ahead of {latest}"),
    }
}

/// One-line build description reported by the health endpoint.
pub fn get_system_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };
    let version = version_label(
        option_env!("RELEASE_VERSION").unwrap_or(""),
        option_env!("LATEST_TAG").unwrap_or(""),
        option_env!("COMMITS_AHEAD").unwrap_or(""),
    );

    format!(
        "{} {} ({version}, commit {COMMIT}, {profile} build)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}

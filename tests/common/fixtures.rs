use profilefinder::config::AppConfig;

/// Build a validated [`AppConfig`] pointed at a test server.
pub fn test_config(base_url: &str) -> AppConfig {
    let config_str = format!(
        r#"
[http]
user_agent = "profilefinder-tests/1.0"
request_timeout_secs = 5

[site]
base_url = "{}"
"#,
        base_url
    );
    let config: AppConfig = toml::from_str(&config_str).expect("test config should parse");
    config.validate().expect("test config should validate");
    config
}

/// Render a search results page containing the given anchor hrefs, wrapped
/// in the nav/footer boilerplate a real results page carries.
pub fn search_results_html(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"        <a href="{}">{}</a>"#, href, href))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Search results</title></head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/login">Log in</a>
        <a href="/pricing">Pricing</a>
    </nav>
    <div class="results">
{}
    </div>
    <footer>© 2024 All rights reserved.</footer>
</body>
</html>
"#,
        anchors
    )
}

/// Render a challenge interstitial shell, as served in place of real results.
pub fn challenge_page_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head><title>Just a moment...</title></head>
<body>
    <div id="challenge-platform">
        <p>Verifying you are human. This may take a few seconds.</p>
    </div>
</body>
</html>
"#
    .to_string()
}

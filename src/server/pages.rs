use axum::response::Html;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>KOReader Sync Server</title>
</head>
<body style="font-family: system-ui, -apple-system, sans-serif; max-width: 800px; margin: 0 auto; padding: 2rem; line-height: 1.6;">
<h1 style="color: #2563eb;">KOReader Sync Server</h1>
<p>This is a lightweight reading progress synchronization server for KOReader devices.</p>
<h2>Getting Started</h2>
<p>To use this sync server with your KOReader device:</p>
<ol>
<li>Open a book and go to Tools &rarr; Progress sync &rarr; Custom sync server</li>
<li>Enter this server's URL as the server address</li>
<li>Choose Register, picking any username and password</li>
<li>On your other devices, choose Login with the same username and password</li>
</ol>
<p style="margin-top: 2rem; padding: 1rem; background-color: #f3f4f6; border-radius: 0.5rem;">
<strong>Note:</strong> the most recent update always wins. If two devices report
progress for the same book, the later request replaces the earlier one even if it
is further behind.
</p>
</body>
</html>
"#;

pub async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

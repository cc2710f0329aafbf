/// The browser front end: an axum app serving the upload form and the
/// resize endpoint. All state is per-request except the XSRF token; the
/// result is returned inline as a data URI, nothing is persisted.
use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, MAX_FILE_SIZE, MAX_FILE_SIZE_MB, MAX_IMAGE_SIZE, MAX_SCALE_PERCENT,
    MIN_IMAGE_SIZE, MIN_SCALE_PERCENT,
};
use crate::document::GifDocument;
use crate::error::{ResizeError, Result};
use crate::info;
use crate::options::{validate_file_size, ResizeRequest, ResizeStrategy};
use crate::presets::PresetSize;
use crate::processing::{process_gif_pipeline, ResizeResult, SourceStats};
use crate::stamp::{create_stamp, StampOptimization};
use crate::utils::{calculate_size_change, download_filename, format_file_size};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uuid::Uuid;

/// Startup options surfaced by the `serve` subcommand.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub xsrf_protection: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            xsrf_protection: true,
        }
    }
}

#[derive(Clone)]
struct AppState {
    /// One token per process; `None` when protection is disabled.
    xsrf_token: Option<String>,
}

/// Bind and run the web app until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState {
        xsrf_token: config
            .xsrf_protection
            .then(|| Uuid::new_v4().simple().to_string()),
    };

    if !config.xsrf_protection {
        crate::warn!("XSRF protection is disabled");
    }

    let app = router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🎞️  GIF Resizer listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/resize", post(handle_resize))
        // 1 MB of slack over the file ceiling for the other form fields
        .layer(DefaultBodyLimit::max((MAX_FILE_SIZE as usize) + 1024 * 1024))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_form(state.xsrf_token.as_deref()))
}

async fn handle_resize(State(state): State<AppState>, multipart: Multipart) -> Response {
    let fields = match collect_fields(multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    if let Some(expected) = state.xsrf_token.as_deref() {
        if fields.token.as_deref() != Some(expected) {
            return error_page(
                StatusCode::FORBIDDEN,
                "The form token is missing or stale. Reload the page and try again.",
            );
        }
    }

    let submission = match build_submission(&fields) {
        Ok(submission) => submission,
        Err(err) => return resize_error_page(&err),
    };

    let (file_name, bytes) = match (fields.file_name, fields.file_bytes) {
        (Some(name), Some(bytes)) if !bytes.is_empty() => (name, bytes),
        _ => return error_page(StatusCode::BAD_REQUEST, "Please choose a GIF file to upload."),
    };

    let outcome = tokio::task::spawn_blocking(move || run_resize(&bytes, submission)).await;

    match outcome {
        Ok(Ok((source, result))) => {
            Html(render_result_page(&file_name, &source, &result)).into_response()
        }
        Ok(Err(err)) => resize_error_page(&err),
        Err(_) => error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "The resize task failed unexpectedly.",
        ),
    }
}

/// What the form asked for: a normal resize or a chat stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Resize(ResizeRequest),
    Stamp(StampOptimization),
}

/// Raw multipart fields, collected before interpretation.
#[derive(Debug, Default, Clone)]
pub struct FormFields {
    pub file_name: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
    pub method: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub scale_percent: Option<String>,
    pub preset: Option<String>,
    pub stamp_level: Option<String>,
    pub keep_aspect: bool,
    pub token: Option<String>,
}

async fn collect_fields(mut multipart: Multipart) -> std::result::Result<FormFields, Response> {
    let mut fields = FormFields::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // Typically the body limit tripping mid-stream
            Err(_) => {
                return Err(error_page(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    &format!(
                        "The upload could not be read. Files are limited to {} MB.",
                        MAX_FILE_SIZE_MB
                    ),
                ))
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                fields.file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(|n| n.to_string());
                match field.bytes().await {
                    Ok(bytes) => fields.file_bytes = Some(bytes.to_vec()),
                    Err(_) => {
                        return Err(error_page(
                            StatusCode::PAYLOAD_TOO_LARGE,
                            &format!(
                                "The uploaded file could not be read. Files are limited to {} MB.",
                                MAX_FILE_SIZE_MB
                            ),
                        ))
                    }
                }
            }
            other => {
                let value = field.text().await.unwrap_or_default();
                match other {
                    "method" => fields.method = Some(value),
                    "width" => fields.width = Some(value),
                    "height" => fields.height = Some(value),
                    "scale_percent" => fields.scale_percent = Some(value),
                    "preset" => fields.preset = Some(value),
                    "stamp_level" => fields.stamp_level = Some(value),
                    "keep_aspect" => fields.keep_aspect = matches!(value.as_str(), "on" | "true" | "1"),
                    "xsrf_token" => fields.token = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(fields)
}

/// Interpret the raw form fields as a validated submission. Pure, so the
/// parsing rules are unit-testable without a running server.
pub fn build_submission(fields: &FormFields) -> Result<Submission> {
    let method = fields.method.as_deref().unwrap_or("custom");

    let strategy = match method {
        "custom" => ResizeStrategy::Custom {
            width: parse_dimension("width", fields.width.as_deref())?,
            height: parse_dimension("height", fields.height.as_deref())?,
        },
        "scale" => ResizeStrategy::Scale {
            percent: parse_dimension("scale percentage", fields.scale_percent.as_deref())?,
        },
        "preset" => {
            let name = fields
                .preset
                .as_deref()
                .ok_or_else(|| ResizeError::UnknownPreset(String::new()))?;
            ResizeStrategy::Preset(name.parse()?)
        }
        "stamp" => {
            let level = fields.stamp_level.as_deref().unwrap_or("standard");
            return Ok(Submission::Stamp(level.parse()?));
        }
        other => {
            return Err(ResizeError::UnsupportedStrategy(other.to_string()));
        }
    };

    Ok(Submission::Resize(ResizeRequest::new(
        strategy,
        fields.keep_aspect,
    )))
}

fn parse_dimension(name: &'static str, value: Option<&str>) -> Result<u32> {
    let raw = value.unwrap_or("").trim();
    raw.parse::<u32>()
        .map_err(|_| ResizeError::InvalidNumber(name, raw.to_string()))
}

fn run_resize(bytes: &[u8], submission: Submission) -> Result<(SourceStats, ResizeResult)> {
    match submission {
        Submission::Resize(request) => process_gif_pipeline(bytes, &request),
        Submission::Stamp(level) => {
            validate_file_size(bytes.len() as u64)?;
            let doc = GifDocument::decode(bytes)?;
            let source = SourceStats::from_document(&doc);
            let result = create_stamp(&doc, level)?;
            Ok((source, result))
        }
    }
}

fn resize_error_page(err: &ResizeError) -> Response {
    let status = match err {
        ResizeError::OversizedUpload(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
        ResizeError::Io(_) | ResizeError::FileNotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    error_page(status, &err.to_string())
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>GIF Resizer</title></head>\n\
         <body><h1>🎞️ GIF Resizer</h1>\n\
         <p>❌ {}</p>\n\
         <p><a href=\"/\">← Back to the form</a></p></body></html>",
        html_escape(message)
    );
    (status, Html(body)).into_response()
}

fn render_form(xsrf_token: Option<&str>) -> String {
    let token_input = xsrf_token
        .map(|t| {
            format!(
                "<input type=\"hidden\" name=\"xsrf_token\" value=\"{}\">",
                html_escape(t)
            )
        })
        .unwrap_or_default();

    let preset_options: String = PresetSize::all()
        .iter()
        .map(|p| format!("<option value=\"{0}\">{0}</option>", p.name()))
        .collect();

    let stamp_options: String = StampOptimization::all()
        .iter()
        .map(|l| format!("<option value=\"{0}\">{0}</option>", l.name()))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>GIF Resizer</title></head>
<body>
<h1>🎞️ GIF Resizer</h1>
<p>Upload a GIF and resize it to the size you want.</p>
<form action="/resize" method="post" enctype="multipart/form-data">
  {token_input}
  <p><input type="file" name="file" accept=".gif" required>
     (GIF only, up to {max_mb} MB)</p>

  <fieldset>
    <legend>Resize method</legend>
    <p><label><input type="radio" name="method" value="custom" checked> Custom size</label>
       width <input type="number" name="width" min="{min_px}" max="{max_px}" value="128">
       height <input type="number" name="height" min="{min_px}" max="{max_px}" value="128"> px</p>
    <p><label><input type="radio" name="method" value="scale"> Scale</label>
       <input type="number" name="scale_percent" min="{min_pct}" max="{max_pct}" value="100"> %</p>
    <p><label><input type="radio" name="method" value="preset"> Preset</label>
       <select name="preset">{preset_options}</select></p>
    <p><label><input type="radio" name="method" value="stamp"> Slack stamp</label>
       <select name="stamp_level">{stamp_options}</select></p>
  </fieldset>

  <p><label><input type="checkbox" name="keep_aspect"> Keep aspect ratio</label></p>
  <p><button type="submit">🔄 Resize</button></p>
</form>
</body>
</html>"#,
        token_input = token_input,
        max_mb = MAX_FILE_SIZE_MB,
        min_px = MIN_IMAGE_SIZE,
        max_px = MAX_IMAGE_SIZE,
        min_pct = MIN_SCALE_PERCENT,
        max_pct = MAX_SCALE_PERCENT,
        preset_options = preset_options,
        stamp_options = stamp_options,
    )
}

fn render_result_page(file_name: &str, source: &SourceStats, result: &ResizeResult) -> String {
    let change = calculate_size_change(source.byte_size, result.byte_size());
    let out_name = download_filename(file_name, result.width, result.height);
    let data_uri = format!("data:image/gif;base64,{}", BASE64.encode(&result.bytes));

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>GIF Resizer</title></head>
<body>
<h1>🎞️ GIF Resizer</h1>
<p>✅ Resize complete for <strong>{name}</strong>.</p>
<table border="1" cellpadding="4">
  <tr><th></th><th>Original</th><th>Resized</th></tr>
  <tr><td>Dimensions</td><td>{ow}x{oh} px</td><td>{nw}x{nh} px</td></tr>
  <tr><td>Frames</td><td>{of}</td><td>{nf}</td></tr>
  <tr><td>File size</td><td>{os}</td><td>{ns} ({chg:+.1}%)</td></tr>
</table>
<p><img src="{uri}" alt="resized GIF" width="{nw}" height="{nh}"></p>
<p><a href="{uri}" download="{dl}">💾 Download {dl}</a></p>
<p><a href="/">← Resize another GIF</a></p>
</body>
</html>"#,
        name = html_escape(file_name),
        ow = source.width,
        oh = source.height,
        nw = result.width,
        nh = result.height,
        of = source.frame_count,
        nf = result.frame_count,
        os = format_file_size(source.byte_size),
        ns = format_file_size(result.byte_size()),
        chg = change,
        uri = data_uri,
        dl = html_escape(&out_name),
    )
}

fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GIF_ENCODER_SPEED;
    use image::codecs::gif::{GifEncoder, Repeat};
    use image::{Delay, Frame, RgbaImage};

    fn fields(method: &str) -> FormFields {
        FormFields {
            method: Some(method.to_string()),
            ..FormFields::default()
        }
    }

    fn sample_gif(width: u32, height: u32, frame_count: usize) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_ENCODER_SPEED);
            encoder.set_repeat(Repeat::Infinite).unwrap();
            for _ in 0..frame_count {
                let buffer = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
                encoder
                    .encode_frame(Frame::from_parts(
                        buffer,
                        0,
                        0,
                        Delay::from_numer_denom_ms(100, 1),
                    ))
                    .unwrap();
            }
        }
        bytes
    }

    #[test]
    fn test_build_submission_custom() {
        let mut f = fields("custom");
        f.width = Some("320".to_string());
        f.height = Some("240".to_string());
        f.keep_aspect = true;

        let submission = build_submission(&f).unwrap();
        assert_eq!(
            submission,
            Submission::Resize(ResizeRequest::new(
                ResizeStrategy::Custom { width: 320, height: 240 },
                true
            ))
        );
    }

    #[test]
    fn test_build_submission_scale_and_preset() {
        let mut f = fields("scale");
        f.scale_percent = Some("50".to_string());
        assert_eq!(
            build_submission(&f).unwrap(),
            Submission::Resize(ResizeRequest::new(ResizeStrategy::Scale { percent: 50 }, false))
        );

        let mut f = fields("preset");
        f.preset = Some("256x256".to_string());
        assert_eq!(
            build_submission(&f).unwrap(),
            Submission::Resize(ResizeRequest::new(
                ResizeStrategy::Preset(PresetSize::Square256),
                false
            ))
        );
    }

    #[test]
    fn test_build_submission_stamp() {
        let mut f = fields("stamp");
        f.stamp_level = Some("lightweight".to_string());
        assert_eq!(
            build_submission(&f).unwrap(),
            Submission::Stamp(StampOptimization::Lightweight)
        );
    }

    #[test]
    fn test_build_submission_rejects_non_numeric() {
        let mut f = fields("custom");
        f.width = Some("abc".to_string());
        f.height = Some("240".to_string());

        let result = build_submission(&f);
        assert!(matches!(result, Err(ResizeError::InvalidNumber("width", _))));
    }

    #[test]
    fn test_build_submission_rejects_unknown_method() {
        let result = build_submission(&fields("telepathy"));
        assert!(matches!(result, Err(ResizeError::UnsupportedStrategy(_))));
    }

    #[test]
    fn test_run_resize_reports_both_sides() {
        let bytes = sample_gif(60, 40, 2);
        let submission = Submission::Resize(ResizeRequest::new(
            ResizeStrategy::Custom { width: 30, height: 20 },
            false,
        ));

        let (source, result) = run_resize(&bytes, submission).unwrap();
        assert_eq!((source.width, source.height), (60, 40));
        assert_eq!(source.frame_count, 2);
        assert_eq!(source.byte_size, bytes.len() as u64);
        assert_eq!((result.width, result.height), (30, 20));
    }

    #[test]
    fn test_run_resize_rejects_non_gif() {
        let submission = Submission::Resize(ResizeRequest::new(
            ResizeStrategy::Scale { percent: 100 },
            false,
        ));
        let result = run_resize(b"\x89PNG\r\n\x1a\n", submission);
        assert!(matches!(result, Err(ResizeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_result_page_contains_stats_and_download_name() {
        let bytes = sample_gif(60, 40, 2);
        let submission = Submission::Resize(ResizeRequest::new(
            ResizeStrategy::Custom { width: 30, height: 20 },
            false,
        ));
        let (source, result) = run_resize(&bytes, submission).unwrap();

        let page = render_result_page("cat.gif", &source, &result);
        assert!(page.contains("60x40 px"));
        assert!(page.contains("30x20 px"));
        assert!(page.contains("cat_resized_30x20.gif"));
        assert!(page.contains("data:image/gif;base64,"));
    }

    #[test]
    fn test_form_embeds_token_and_presets() {
        let page = render_form(Some("token123"));
        assert!(page.contains("name=\"xsrf_token\" value=\"token123\""));
        assert!(page.contains("256x256"));
        assert!(page.contains("lightweight"));

        let page = render_form(None);
        assert!(!page.contains("xsrf_token"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&\"c\"'d'"), "a&lt;b&gt;&amp;&quot;c&quot;&#39;d&#39;");
    }
}

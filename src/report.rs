// src/report.rs
//! Renders the persisted JSON snapshot into a single self-contained HTML
//! page. The data is embedded as an inline literal, so the page works
//! offline with no server fetch; all per-card formatting (thumbnails,
//! locale-aware numbers and dates) happens client-side.

use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::{Error, Result};

/// Pull the 11-character video id out of a watch URL. Covers the platform's
/// known shapes: `watch?v=`, `/embed/`, `/v/`, and `youtu.be/` short links.
/// Mirrors the regex embedded in the page script.
pub fn extract_video_id(url: &str) -> Option<&str> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
            .unwrap()
    });
    re.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Read the structured-data file back (an independent boundary: any
/// conforming JSON array renders, not just in-memory state from this run)
/// and write the report document. Returns the record count.
pub fn render_report(json_path: &Path, html_path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(json_path)?;
    let data: serde_json::Value = serde_json::from_str(&raw)?;
    let records = data
        .as_array()
        .ok_or_else(|| Error::Data("expected a top-level JSON array".to_string()))?;

    let without_thumbnail = records
        .iter()
        .filter(|r| {
            r.get("url")
                .and_then(|u| u.as_str())
                .and_then(extract_video_id)
                .is_none()
        })
        .count();
    if without_thumbnail > 0 {
        tracing::debug!(
            count = without_thumbnail,
            "records without an extractable video id will use the placeholder thumbnail"
        );
    }

    let source_name = json_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| json_path.display().to_string());
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let page = render_page(&serde_json::to_string(&data)?, &source_name, &generated_at);

    let mut tmp_name = html_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = html_path.with_file_name(tmp_name);
    if let Err(e) = fs::write(&tmp, page).and_then(|_| fs::rename(&tmp, html_path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    tracing::info!(path = %html_path.display(), count = records.len(), "wrote report");
    Ok(records.len())
}

/// Deterministic inner renderer: identical inputs yield byte-identical pages.
/// `data_json` must already be valid JSON; `source_name` and `generated_at`
/// are HTML-escaped here.
pub fn render_page(data_json: &str, source_name: &str, generated_at: &str) -> String {
    // Keep embedded markup (e.g. "</script>" inside a title) from closing
    // the script element early.
    let data = data_json.replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trending Videos</title>
    <style>{css}</style>
</head>
<body>
    <h1>Trending Videos</h1>

    <div class="data-source" id="dataSource">Source: {source} | Generated: {generated}</div>

    <div id="error" class="error" style="display: none;"></div>
    <div id="loading" class="loading">Loading data...</div>
    <div id="videoContainer" class="video-container"></div>

    <script>
        const videoData = {data};
{script}
    </script>
</body>
</html>
"#,
        css = PAGE_CSS,
        source = html_escape::encode_text(source_name),
        generated = html_escape::encode_text(generated_at),
        data = data,
        script = PAGE_SCRIPT,
    )
}

const PAGE_CSS: &str = r#"
        body {
            font-family: Arial, sans-serif;
            max-width: 1000px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
            color: #333;
        }
        h1 {
            color: #d32f2f;
            text-align: center;
            margin-bottom: 30px;
        }
        .video-container {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 20px;
        }
        .video-card {
            background-color: white;
            border-radius: 8px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
            overflow: hidden;
            transition: transform 0.3s ease, box-shadow 0.3s ease;
        }
        .video-card:hover {
            transform: translateY(-5px);
            box-shadow: 0 5px 15px rgba(0,0,0,0.2);
        }
        .video-thumbnail {
            position: relative;
            width: 100%;
            padding-top: 56.25%; /* 16:9 */
            background-color: #eee;
            overflow: hidden;
        }
        .video-thumbnail img {
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            object-fit: cover;
        }
        .video-thumbnail .play-button {
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            width: 60px;
            height: 60px;
            background-color: rgba(255, 0, 0, 0.8);
            border-radius: 50%;
            display: flex;
            justify-content: center;
            align-items: center;
        }
        .video-thumbnail .play-button:after {
            content: '';
            display: block;
            width: 0;
            height: 0;
            border-top: 10px solid transparent;
            border-left: 20px solid white;
            border-bottom: 10px solid transparent;
            margin-left: 5px;
        }
        .video-info {
            padding: 15px;
        }
        .video-title {
            font-size: 16px;
            font-weight: bold;
            margin-bottom: 10px;
            line-height: 1.4;
            height: 44px;
            overflow: hidden;
            display: -webkit-box;
            -webkit-line-clamp: 2;
            -webkit-box-orient: vertical;
        }
        .video-meta {
            display: flex;
            justify-content: space-between;
            color: #666;
            font-size: 14px;
        }
        .video-views {
            display: flex;
            align-items: center;
        }
        .video-views:before {
            content: '\1F441';
            margin-right: 5px;
        }
        .video-date {
            display: flex;
            align-items: center;
        }
        .video-date:before {
            content: '\1F4C5';
            margin-right: 5px;
        }
        .loading {
            text-align: center;
            padding: 50px;
            font-size: 18px;
            color: #666;
        }
        .error {
            text-align: center;
            padding: 20px;
            color: #d32f2f;
            background-color: #ffebee;
            border-radius: 4px;
            margin: 20px 0;
        }
        .data-source {
            text-align: center;
            margin-top: 10px;
            color: #666;
            font-size: 14px;
        }
"#;

const PAGE_SCRIPT: &str = r#"
        // Locale-aware thousands separators; malformed counts become "NaN"
        // rather than breaking the page.
        function formatNumber(num) {
            return new Intl.NumberFormat().format(num);
        }

        function formatDate(dateString) {
            const date = new Date(dateString);
            return date.toLocaleString(undefined, {
                year: 'numeric',
                month: '2-digit',
                day: '2-digit',
                hour: '2-digit',
                minute: '2-digit'
            });
        }

        function getVideoId(url) {
            const regex = /(?:youtube\.com\/(?:[^\/]+\/.+\/|(?:v|e(?:mbed)?)\/|.*[?&]v=)|youtu\.be\/)([^"&?\/\s]{11})/;
            const match = String(url).match(regex);
            return match ? match[1] : null;
        }

        function displayData() {
            const videoContainer = document.getElementById('videoContainer');
            const loadingElement = document.getElementById('loading');
            const errorElement = document.getElementById('error');

            loadingElement.style.display = 'none';

            if (!videoData || videoData.length === 0) {
                errorElement.textContent = 'No video data found';
                errorElement.style.display = 'block';
                return;
            }

            videoContainer.innerHTML = '';

            videoData.forEach(video => {
                const videoId = getVideoId(video.url);
                const thumbnailUrl = videoId ?
                    `https://img.youtube.com/vi/${videoId}/mqdefault.jpg` :
                    'placeholder.jpg';

                const videoCard = document.createElement('div');
                videoCard.className = 'video-card';

                videoCard.innerHTML = `
                    <a href="${video.url}" target="_blank" rel="noopener noreferrer">
                        <div class="video-thumbnail">
                            <img src="${thumbnailUrl}" alt="${video.title}" loading="lazy">
                            <div class="play-button"></div>
                        </div>
                    </a>
                    <div class="video-info">
                        <div class="video-title">${video.title}</div>
                        <div class="video-meta">
                            <div class="video-views">${formatNumber(video.view_count)}</div>
                            <div class="video-date">${formatDate(video.published_at)}</div>
                        </div>
                    </div>
                `;

                videoContainer.appendChild(videoCard);
            });
        }

        document.addEventListener('DOMContentLoaded', displayData);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=ABCDEFGHIJK"),
            Some("ABCDEFGHIJK")
        );
    }

    #[test]
    fn extracts_id_from_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/ABCDEFGHIJK"),
            Some("ABCDEFGHIJK")
        );
    }

    #[test]
    fn extracts_id_from_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/ABCDEFGHIJK"),
            Some("ABCDEFGHIJK")
        );
    }

    #[test]
    fn extracts_id_with_extra_query_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=ABCDEFGHIJK"),
            Some("ABCDEFGHIJK")
        );
    }

    #[test]
    fn no_id_in_unrecognizable_url() {
        assert_eq!(extract_video_id("https://example.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
    }

    #[test]
    fn page_embeds_data_and_caption() {
        let page = render_page(r#"[{"title":"t"}]"#, "videos.json", "2024-01-01 00:00:00");
        assert!(page.contains(r#"const videoData = [{"title":"t"}];"#));
        assert!(page.contains("Source: videos.json"));
        assert!(page.contains("Generated: 2024-01-01 00:00:00"));
    }

    #[test]
    fn embedded_close_tags_cannot_break_the_script() {
        let page = render_page(r#"[{"title":"</script><b>x"}]"#, "v.json", "t");
        assert!(!page.contains(r#""title":"</script>"#));
        assert!(page.contains(r#""title":"<\/script>"#));
    }

    #[test]
    fn page_is_deterministic_for_fixed_inputs() {
        let a = render_page("[]", "videos.json", "2024-01-01 00:00:00");
        let b = render_page("[]", "videos.json", "2024-01-01 00:00:00");
        assert_eq!(a, b);
    }
}

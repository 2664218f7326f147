//! Pages HTML : coquille de la carte et page détail d'un village

use anyhow::Result;

use crate::config::Config;

const MAPLIBRE_VERSION: &str = "4.7.1";

/// Échappe du texte pour un contenu ou un attribut HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON inclus dans un `<script>` : `<` échappé pour ne jamais fermer la balise
fn script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

const STYLE: &str = r#"
html, body { margin: 0; height: 100%; font-family: system-ui, sans-serif; }
#map { position: relative; height: 100%; width: 100%; }
.village-card { position: absolute; right: 16px; top: 16px; width: 340px; z-index: 2;
  border-radius: 16px; background: rgba(255,255,255,.95); padding: 16px;
  box-shadow: 0 4px 16px rgba(0,0,0,.15); }
.village-card__title { font-size: 18px; font-weight: 600; color: #111; }
.village-card__zone { display: inline-block; margin-top: 6px; padding: 2px 8px;
  border-radius: 8px; color: #fff; font-size: 12px; }
.village-card__key { margin-top: 4px; font-size: 14px; color: #111; }
.village-card__actions { margin-top: 16px; display: flex; gap: 8px; }
.village-card__link { border-radius: 12px; background: #000; color: #fff;
  padding: 8px 12px; font-size: 14px; text-decoration: none; }
.village-card__close { border-radius: 12px; border: 1px solid #ccc; background: #fff;
  padding: 8px 12px; font-size: 14px; cursor: pointer; }
.village-legend { position: absolute; left: 16px; bottom: 24px; z-index: 2;
  background: rgba(255,255,255,.95); border-radius: 12px; padding: 8px 12px;
  font-size: 13px; box-shadow: 0 2px 8px rgba(0,0,0,.12); }
.village-legend__entry { display: flex; align-items: center; gap: 6px; margin: 2px 0; }
.village-legend__swatch { width: 14px; height: 14px; border-radius: 3px; }
"#;

/// Page principale : MapLibre, bundle wasm et options de vue
pub fn index_page(config: &Config) -> Result<String> {
    let options = script_json(&config.view_json()?);
    let title = escape_html(&config.title);

    Ok(format!(
        r#"<!doctype html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/maplibre-gl@{version}/dist/maplibre-gl.css">
<script src="https://unpkg.com/maplibre-gl@{version}/dist/maplibre-gl.js"></script>
<style>{style}</style>
</head>
<body>
<div id="map"></div>
<script id="view-options" type="application/json">{options}</script>
<script type="module">
import init, {{ mount }} from "/pkg/village_map_web.js";
await init();
const options = JSON.parse(document.getElementById("view-options").textContent);
window.villageMap = await mount("map", options);
</script>
</body>
</html>
"#,
        title = title,
        version = MAPLIBRE_VERSION,
        style = STYLE,
        options = options,
    ))
}

/// Page détail d'un village (identifiant déjà décodé)
pub fn detail_page(id: &str) -> String {
    let id = escape_html(id);
    format!(
        r#"<!doctype html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<title>里詳細頁 {id}</title>
<style>
main {{ min-height: 100vh; padding: 24px; font-family: system-ui, sans-serif; }}
.title {{ font-size: 24px; font-weight: 600; }}
.key {{ margin-top: 8px; color: #374151; }}
.contact {{ margin-top: 24px; border: 1px solid #e5e7eb; border-radius: 16px; padding: 16px; }}
.contact__label {{ font-weight: 500; }}
.contact__value {{ margin-top: 4px; color: #4b5563; }}
</style>
</head>
<body>
<main>
<div class="title">里詳細頁</div>
<div class="key">Key：{id}</div>
<div class="contact">
<div class="contact__label">負責人</div>
<div class="contact__value">（下一步再串資料）</div>
</div>
</main>
</body>
</html>
"#,
        id = id
    )
}

/// Page d'erreur minimale
pub fn error_page(message: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Error</title></head>\
         <body><main><p>{}</p><p><a href=\"/\">←</a></p></main></body></html>\n",
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("中正里"), "中正里");
    }

    #[test]
    fn test_detail_page_shows_key() {
        let html = detail_page("A-01");
        assert!(html.contains("里詳細頁"));
        assert!(html.contains("Key：A-01"));
        assert!(html.contains("負責人"));
        assert!(html.contains("（下一步再串資料）"));
    }

    #[test]
    fn test_detail_page_escapes_id() {
        let html = detail_page("<script>alert(1)</script>");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("Key：&lt;script&gt;"));
    }

    #[test]
    fn test_index_page_embeds_options() {
        let mut config = Config::default();
        config.view.asset_url = "/data/</script>.geojson".to_string();
        let html = index_page(&config).unwrap();

        assert!(html.contains(r#"mount("map", options)"#));
        assert!(html.contains("\"zoom\":9.5"));
        assert!(html.contains("\\u003c/script>.geojson"));
        assert!(!html.contains("/data/</script>"));
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde_json::{json, Value};
use tracing::info;

use super::ChartKind;
use crate::pipeline::count::FrequencyTable;
use crate::pipeline::rank::RankedEntry;

/// Font size range (px) for the word cloud, smallest to largest count.
pub const WORD_SIZE_RANGE: [u32; 2] = [20, 100];

const ECHARTS_JS: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";
const WORDCLOUD_JS: &str =
    "https://cdn.jsdelivr.net/npm/echarts-wordcloud@2/dist/echarts-wordcloud.min.js";
const NO_DATA: &str = "暂无数据";

pub struct Report<'a> {
    pub url: &'a str,
    pub chart: ChartKind,
    pub min_freq: u64,
    pub generated_at: DateTime<Local>,
}

/// Word cloud over every entry that passed the threshold.
pub fn wordcloud_option(table: &FrequencyTable) -> Value {
    let title = json!({ "text": "词云图", "left": "center" });
    if table.is_empty() {
        return empty_option(title);
    }

    let data: Vec<Value> = table
        .iter()
        .map(|(word, count)| json!({ "name": word, "value": count }))
        .collect();

    json!({
        "title": title,
        "tooltip": { "show": true },
        "series": [{
            "type": "wordCloud",
            "shape": "circle",
            "sizeRange": WORD_SIZE_RANGE,
            "rotationRange": [-90, 90],
            "gridSize": 8,
            "data": data,
        }],
    })
}

/// One chart over the ranked entries.
pub fn chart_option(kind: ChartKind, top: &[RankedEntry]) -> Value {
    let title = json!({ "text": kind.title(), "left": "center" });
    if top.is_empty() {
        return empty_option(title);
    }

    let words: Vec<&str> = top.iter().map(RankedEntry::word).collect();
    let counts: Vec<u64> = top.iter().map(RankedEntry::count).collect();

    let series = match kind {
        ChartKind::Pie => {
            let data: Vec<Value> = top
                .iter()
                .map(|e| json!({ "name": e.word(), "value": e.count() }))
                .collect();
            return json!({
                "title": title,
                "tooltip": { "trigger": "item" },
                "series": [{ "type": "pie", "radius": "60%", "data": data }],
            });
        }
        ChartKind::Bar => json!({ "type": "bar", "data": counts }),
        ChartKind::Line | ChartKind::Candlestick => json!({ "type": "line", "data": counts }),
        ChartKind::Scatter => json!({ "type": "scatter", "data": counts }),
        ChartKind::Area => json!({ "type": "line", "areaStyle": {}, "data": counts }),
        ChartKind::Box => {
            // one single-sample box per word: min = q1 = median = q3 = max
            let boxes: Vec<[u64; 5]> = counts.iter().map(|&c| [c; 5]).collect();
            json!({ "type": "boxplot", "data": boxes })
        }
    };

    json!({
        "title": title,
        "tooltip": { "trigger": "axis" },
        "xAxis": { "type": "category", "name": "Word", "data": words, "axisLabel": { "rotate": 45 } },
        "yAxis": { "type": "value", "name": "Count" },
        "series": [series],
    })
}

fn empty_option(title: Value) -> Value {
    json!({
        "title": title,
        "graphic": {
            "type": "text",
            "left": "center",
            "top": "middle",
            "style": { "text": NO_DATA, "fontSize": 20 },
        },
    })
}

/// Standalone HTML page with the word cloud and the selected chart.
pub fn render(report: &Report, table: &FrequencyTable, top: &[RankedEntry]) -> String {
    let cloud = script_json(&wordcloud_option(table));
    let chart = script_json(&chart_option(report.chart, top));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>词频分析 - {url}</title>
<script src="{echarts}"></script>
<script src="{wordcloud}"></script>
</head>
<body>
<h2>词频分析</h2>
<p>{url} · 最小词频 {min_freq} · {generated}</p>
<div id="wordcloud" style="width:100%;height:600px"></div>
<div id="chart" style="width:100%;height:500px"></div>
<script>
echarts.init(document.getElementById("wordcloud")).setOption({cloud});
echarts.init(document.getElementById("chart")).setOption({chart});
</script>
</body>
</html>
"#,
        url = escape_html(report.url),
        echarts = ECHARTS_JS,
        wordcloud = WORDCLOUD_JS,
        min_freq = report.min_freq,
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        cloud = cloud,
        chart = chart,
    )
}

pub fn write(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write report {}", path.display()))?;
    info!(path = %path.display(), bytes = html.len(), "Wrote HTML report");
    Ok(())
}

/// JSON safe to inline in a `<script>` block. Tokens may contain markup, and
/// `<!--` or `<script` inside script data changes how the parser finds the
/// closing tag, so no `<` survives. serde_json only emits `<` inside strings.
fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::count::count;

    fn sample_top() -> Vec<RankedEntry> {
        vec![RankedEntry("数据".into(), 5), RankedEntry("词语".into(), 3)]
    }

    #[test]
    fn wordcloud_uses_full_table_and_size_range() {
        let table = count(["a", "b", "b", "c"]);
        let opt = wordcloud_option(&table);
        let series = &opt["series"][0];
        assert_eq!(series["type"], "wordCloud");
        assert_eq!(series["sizeRange"], json!([20, 100]));
        assert_eq!(series["data"].as_array().unwrap().len(), 3);
        assert_eq!(series["data"][1], json!({ "name": "b", "value": 2 }));
    }

    #[test]
    fn candlestick_draws_line() {
        let opt = chart_option(ChartKind::Candlestick, &sample_top());
        assert_eq!(opt["series"][0]["type"], "line");
        assert_eq!(opt["title"]["text"], "词频K线图");
        assert_eq!(opt["xAxis"]["data"], json!(["数据", "词语"]));
    }

    #[test]
    fn every_kind_renders_all_entries() {
        let top = sample_top();
        for kind in [
            ChartKind::Bar,
            ChartKind::Pie,
            ChartKind::Line,
            ChartKind::Scatter,
            ChartKind::Area,
            ChartKind::Box,
            ChartKind::Candlestick,
        ] {
            let opt = chart_option(kind, &top);
            assert_eq!(opt["series"][0]["data"].as_array().unwrap().len(), top.len());
        }
    }

    #[test]
    fn pie_and_box_shapes() {
        let pie = chart_option(ChartKind::Pie, &sample_top());
        assert_eq!(pie["series"][0]["data"][0], json!({ "name": "数据", "value": 5 }));

        let boxplot = chart_option(ChartKind::Box, &sample_top());
        assert_eq!(boxplot["series"][0]["data"][1], json!([3, 3, 3, 3, 3]));

        let area = chart_option(ChartKind::Area, &sample_top());
        assert!(area["series"][0]["areaStyle"].is_object());
    }

    #[test]
    fn empty_data_shows_placeholder() {
        let cloud = wordcloud_option(&FrequencyTable::new());
        assert_eq!(cloud["graphic"]["style"]["text"], NO_DATA);
        assert!(cloud.get("series").is_none());

        let chart = chart_option(ChartKind::Bar, &[]);
        assert_eq!(chart["graphic"]["style"]["text"], NO_DATA);
    }

    #[test]
    fn page_escapes_markup_tokens() {
        let table = count(["</script>", "</script>"]);
        let top = vec![RankedEntry("</script>".into(), 2)];
        let report = Report {
            url: "http://example.com/?a=<b>",
            chart: ChartKind::Bar,
            min_freq: 1,
            generated_at: Local::now(),
        };
        let page = render(&report, &table, &top);
        assert_eq!(page.matches("</script>").count(), 3);
        assert!(page.contains("\\u003c/script>"));
        assert!(page.contains("a=&lt;b&gt;"));
    }

    /// Body of the last inline `<script>` element, as an HTML parser would
    /// delimit it when nothing inside can open a comment or nested script.
    fn inline_script(page: &str) -> &str {
        let start = page.rfind("<script>").unwrap() + "<script>".len();
        let end = start + page[start..].find("</script>").unwrap();
        &page[start..end]
    }

    #[test]
    fn comment_and_script_tokens_keep_page_intact() {
        let table = count(["<!--", "<script>", "x", "<!--", "<script>"]);
        let top = crate::pipeline::rank::top(&table, 20);
        let report = Report {
            url: "http://example.com/",
            chart: ChartKind::Bar,
            min_freq: 1,
            generated_at: Local::now(),
        };
        let page = render(&report, &table, &top);

        let script = inline_script(&page);
        assert!(!script.contains('<'));
        assert!(script.contains("\\u003c!--"));
        assert!(script.contains("\\u003cscript>"));
        // both setOption calls sit inside the element, and the page closes after it
        assert_eq!(script.matches("setOption(").count(), 2);
        let tail = &page[page.rfind("</script>").unwrap()..];
        assert!(tail.contains("</body>") && tail.contains("</html>"));
    }

    #[test]
    fn writes_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("wordfreq-test-{}", std::process::id()));
        let path = dir.join("nested").join("report.html");
        write(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        fs::remove_dir_all(&dir).unwrap();
    }
}

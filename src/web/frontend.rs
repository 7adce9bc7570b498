//! The form page served by `scorecard serve`.
//!
//! The document shell and stylesheet are a fixed string. Everything that
//! varies per request (form values, container contents, alerts) is built as
//! an element tree and escaped on the way out.

use crate::form::{Field, FormValues};
use crate::page::{Container, MemoryPage};
use crate::render::{Element, Node, alert_banner};

/// Document start: head, stylesheet and the opening of `<body>`.
const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Student Performance Predictor</title>
<style>
:root {
  --bg: #0f172a;
  --surface: #1e293b;
  --border: #334155;
  --text: #e2e8f0;
  --text-muted: #94a3b8;
  --accent: #6366f1;
  --red: #ef4444;
  --radius: 10px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1100px; margin: 0 auto; padding: 24px; }

header { margin-bottom: 24px; padding-bottom: 16px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 24px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.layout { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; margin-bottom: 24px; }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
}
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 16px; }

/* Form */
.field { margin-bottom: 12px; }
.field label { display: block; font-size: 12px; color: var(--text-muted); margin-bottom: 4px; }
.field input {
  width: 100%;
  padding: 8px 10px;
  border-radius: 6px;
  border: 1px solid var(--border);
  background: var(--bg);
  color: var(--text);
  font-size: 14px;
}
button {
  width: 100%;
  padding: 10px;
  border: none;
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  font-weight: 600;
  cursor: pointer;
}

/* Alert */
.alert {
  border: 1px solid var(--red);
  color: var(--red);
  border-radius: var(--radius);
  padding: 12px 16px;
  margin-bottom: 16px;
}

/* Results */
.result-display { text-align: center; }
.score-circle {
  width: 120px; height: 120px;
  border-radius: 50%;
  margin: 0 auto 12px;
  display: flex; align-items: center; justify-content: center;
  font-size: 36px; font-weight: 700; color: #fff;
}
.category { font-size: 20px; font-weight: 600; margin-bottom: 8px; }
.confidence-badge { display: inline-block; padding: 4px 12px; border-radius: 12px; font-size: 12px; margin-bottom: 16px; }
.contributions { text-align: left; }
.contributions h3 { font-size: 14px; color: var(--text-muted); margin-bottom: 8px; }
.contribution-item { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid var(--border); }

/* Statistics */
#statistics { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 16px; }
.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  text-align: center;
}
.stat-value { font-size: 28px; font-weight: 700; color: var(--accent); }
.stat-label { font-size: 12px; color: var(--text-muted); text-transform: uppercase; letter-spacing: 0.5px; }
.placeholder { color: var(--text-muted); }
</style>
</head>
<body>
"##;

const PAGE_TAIL: &str = "\n</body>\n</html>\n";

/// Render the full page around the current state of `page`.
pub fn render_page(values: &FormValues, page: &MemoryPage) -> String {
    let results = page.contents(Container::Results);
    let statistics = page.contents(Container::Statistics);

    let mut app = Element::div("app").child(
        Element::new("header")
            .child(Element::new("h1").text("Student Performance Predictor"))
            .child(Element::div("subtitle").text("AI-powered academic performance forecasting")),
    );

    for message in &page.alerts {
        app = app.child(alert_banner(message));
    }

    let results_card = Element::div("card")
        .child(Element::new("h2").text("Prediction"))
        .child(container_slot(
            Container::Results,
            results,
            "Submit the form to see a prediction.",
        ));

    app = app
        .child(
            Element::div("layout")
                .child(form_card(values))
                .child(results_card),
        )
        .child(Element::new("h2").text("Statistics"))
        .child(container_slot(
            Container::Statistics,
            statistics,
            "Statistics unavailable.",
        ));

    format!("{PAGE_HEAD}{}{PAGE_TAIL}", app.render())
}

fn form_card(values: &FormValues) -> Element {
    let fields = Field::ALL.iter().map(|&field| {
        let input = Element::new("input")
            .attr("id", field.form_name())
            .attr("name", field.form_name())
            .attr("value", values.get(field));
        let input = match field {
            Field::StudentId => input.attr("type", "text"),
            _ => input.attr("type", "number").attr("step", "any"),
        };
        Element::div("field")
            .child(
                Element::new("label")
                    .attr("for", field.form_name())
                    .text(field.label()),
            )
            .child(input)
    });

    Element::div("card").child(Element::new("h2").text("Student Metrics")).child(
        Element::new("form")
            .attr("method", "post")
            .attr("action", "/predict")
            .children(fields)
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .text("Predict Performance"),
            ),
    )
}

/// A container element holding already-rendered HTML.
///
/// Container contents come from the controller's own views, which escape
/// every value, so they are spliced in verbatim.
fn container_slot(container: Container, html: &str, placeholder: &str) -> Element {
    if html.is_empty() {
        return Element::new("div")
            .attr("id", container.id())
            .child(Element::div("placeholder").text(placeholder));
    }
    Element::new("div")
        .attr("id", container.id())
        .child(Node::Trusted(html.to_string()))
}

/// Views for the two page containers and the alert banner.
use super::{Category, Element, Fragment, format_number};
use crate::api::types::{PredictionResult, StatisticsSnapshot};

/// The results container: score, category, confidence and the four
/// contribution percentages.
pub fn prediction_view(result: &PredictionResult) -> Element {
    let category = Category::from_label(&result.category);
    let color = category.color();
    let contributions = &result.contributions;

    Element::div("result-display")
        .child(
            Element::div("score-circle")
                .style(format!("background: {color}"))
                .text(format_number(result.predicted_score)),
        )
        .child(
            Element::div("category")
                .style(format!("color: {color}"))
                .text(format!("{} Performance", result.category)),
        )
        .child(
            Element::div("confidence-badge")
                .style(format!("background: {}; color: {color}", category.tint()))
                .text(format!("{} Confidence", result.confidence)),
        )
        .child(
            Element::div("contributions")
                .child(Element::new("h3").text("AI Feature Analysis:"))
                .child(contribution_item("Attendance Impact:", contributions.attendance))
                .child(contribution_item("Tests Impact:", contributions.tests))
                .child(contribution_item("Assignment Impact:", contributions.assignment))
                .child(contribution_item("Study Hours Impact:", contributions.study_hours)),
        )
}

fn contribution_item(label: &str, pct: f64) -> Element {
    Element::div("contribution-item")
        .child(Element::new("span").text(label))
        .child(Element::new("strong").text(format!("{}%", format_number(pct))))
}

/// The statistics container: total, average, then one card per category in
/// the order the service listed them.
pub fn statistics_view(stats: &StatisticsSnapshot) -> Fragment {
    let mut cards = vec![
        stat_card(stats.total.to_string(), "Total AI Predictions"),
        stat_card(format_number(stats.average_score), "Average Predicted Score"),
    ];
    cards.extend(
        stats
            .by_category
            .iter()
            .map(|(label, count)| stat_card(count.to_string(), label)),
    );
    cards.into_iter().collect()
}

fn stat_card(value: String, label: &str) -> Element {
    Element::div("stat-card")
        .child(Element::div("stat-value").text(value))
        .child(Element::div("stat-label").text(label))
}

/// Inline banner standing in for a blocking alert on the served page.
pub fn alert_banner(message: &str) -> Element {
    Element::div("alert")
        .attr("role", "alert")
        .text(message)
}

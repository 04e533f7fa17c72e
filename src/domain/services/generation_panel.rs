#[cfg(test)]
#[path = "generation_panel_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::GenerationPhase;
use super::GenerationState;

/// Renders a `GenerationState` into lines for the terminal. Pure; holds no
/// state of its own.
pub struct GenerationPanel<'a> {
    state: &'a GenerationState,
}

impl<'a> GenerationPanel<'a> {
    pub fn new(state: &'a GenerationState) -> GenerationPanel<'a> {
        return GenerationPanel { state };
    }

    pub fn title(&self) -> String {
        return format!("Generate Tests for {}", self.state.request.name);
    }

    pub fn status_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = vec![];

        if let Some(alert) = &self.state.alert {
            lines.push(Line::from(Span::styled(
                format!("! {alert} (d to dismiss)"),
                Style::default().fg(Color::Yellow),
            )));
        }

        match self.state.phase() {
            GenerationPhase::Failed => {
                let error = self.state.error.clone().unwrap_or_default();
                lines.push(Line::from(Span::styled(
                    format!("✗ {error} (d to dismiss)"),
                    Style::default().fg(Color::Red),
                )));
            }
            GenerationPhase::CreatingFolder => {
                lines.push(Line::from(Span::styled(
                    "⟳ Creating test folder...".to_string(),
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::from(
                    "Do not close this window. The generation will also stop.".to_string(),
                ));
            }
            GenerationPhase::Generating => {
                lines.push(Line::from(Span::styled(
                    format!(
                        "⟳ Generating and creating test cases ({} generated)...",
                        self.state.test_cases.len()
                    ),
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::from(
                    "Do not close this window. The generation will also stop.".to_string(),
                ));
            }
            GenerationPhase::Success => {
                lines.push(Line::from(Span::styled(
                    format!(
                        "✓ Successfully generated {} test cases",
                        self.state.test_cases.len()
                    ),
                    Style::default().fg(Color::Green),
                )));
            }
            GenerationPhase::Idle => {
                lines.push(Line::from(Span::styled(
                    "No test cases generated yet".to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
        }

        return lines;
    }

    pub fn case_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = vec![];

        for test_case in &self.state.test_cases {
            lines.push(Line::from(Span::styled(
                test_case.description.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}", test_case.request.method),
                    Style::default().fg(Color::Magenta),
                ),
                Span::from(format!(" {}", test_case.request.url)),
            ]));

            let tags = test_case
                .categories
                .iter()
                .chain(test_case.types.iter())
                .map(|tag| {
                    return format!("[{tag}]");
                })
                .collect::<Vec<String>>();
            if !tags.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", tags.join(" ")),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
        }

        return lines;
    }

    pub fn footer_line(&self) -> Line<'static> {
        if self.state.generating {
            return Line::from(vec![
                Span::styled(
                    "Esc".to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::from(" cancel generation (close is disabled while generating)".to_string()),
            ]);
        }

        return Line::from(vec![
            Span::styled(
                "q".to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::from(" close  ".to_string()),
            Span::styled(
                "r".to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::from(" regenerate".to_string()),
        ]);
    }
}

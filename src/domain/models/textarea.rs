use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(TextArea::prompt_block("Ask Xceed AI…"));

        return textarea;
    }

    pub fn prompt_block(title: &'a str) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn email_block(error: Option<&str>) -> Block<'a> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .padding(Padding::new(1, 1, 0, 0));

        if let Some(err) = error {
            return block
                .title(format!("📧 {err}"))
                .border_style(Style::default().fg(Color::Red));
        }

        return block.title("📧 Please enter your email address to receive the proposal");
    }
}

//! Widgets for each section of the page.

use chrono::{Datelike, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{App, NAV_ITEMS, SUBMIT_ROW, Section};
use crate::domain::{
    FIXED_ANNUAL_RATE_PERCENT, PRINCIPAL_MAX, PRINCIPAL_MIN, TERM_MAX, TERM_MIN,
};
use crate::page::{CalcField, FormField, ToastVariant};
use crate::report::{format_eur, format_eur_whole, format_rate, representative_example};

const BRAND: Color = Color::Rgb(250, 204, 21);
const MUTED: Color = Color::Rgb(196, 181, 253);
const FRAME: Color = Color::Rgb(107, 33, 168);

const PERKS: [&str; 4] = [
    "• Réponse sous 24h",
    "• Taux fixe garanti de 2%",
    "• Sans frais de dossier",
    "• Remboursement anticipé sans pénalité",
];

impl App {
    pub(super) fn draw(&mut self, frame: &mut Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        draw_hero(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        draw_footer(frame, chunks[3]);
        self.draw_help(frame, chunks[4]);
        self.draw_toast(frame, size);
    }

    fn section_block(&self, title: &'static str, section: Section) -> Block<'static> {
        let focused = self.focus == section;
        let border = if focused {
            Style::default().fg(BRAND)
        } else {
            Style::default().fg(FRAME)
        };
        Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border)
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let focused = self.focus == Section::Header;
        let mut spans = vec![
            Span::styled("◆ Atom", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("    "),
        ];
        for (i, item) in NAV_ITEMS.iter().enumerate() {
            let is_cta = i == NAV_ITEMS.len() - 1;
            let mut style = if is_cta {
                Style::default().fg(Color::Black).bg(BRAND)
            } else {
                Style::default().fg(Color::White)
            };
            if focused && i == self.nav_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let label = if is_cta {
                format!(" {item} ")
            } else {
                format!("{item} ▾")
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw("   "));
        }

        let p = Paragraph::new(Line::from(spans)).block(self.section_block("", Section::Header));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(9)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.draw_calculator(frame, top[0]);
        self.draw_catalog(frame, top[1]);
        self.draw_form(frame, rows[1]);
    }

    fn draw_calculator(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.section_block(" Simulateur de prêt ", Section::Calculator);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let calc = &self.shell.calculator;
        let a = calc.amortization();
        let focused = self.focus == Section::Calculator;
        let bar_width = usize::from(inner.width.saturating_sub(4)).clamp(10, 60);

        let marker = |field: CalcField| {
            if focused && calc.active() == field {
                Span::styled("» ", Style::default().fg(BRAND))
            } else {
                Span::raw("  ")
            }
        };
        let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(MUTED);

        let lines = vec![
            Line::from(vec![
                marker(CalcField::Amount),
                Span::styled("Montant souhaité  ", muted),
                Span::styled(format_eur_whole(calc.principal()), value_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(slider(calc.principal(), PRINCIPAL_MIN, PRINCIPAL_MAX, bar_width), Style::default().fg(BRAND)),
            ]),
            Line::from(Span::styled(
                format!("  {} … {}", format_eur_whole(PRINCIPAL_MIN), format_eur_whole(PRINCIPAL_MAX)),
                muted,
            )),
            Line::from(vec![
                marker(CalcField::Duration),
                Span::styled("Durée du prêt     ", muted),
                Span::styled(format!("{} mois", calc.term_months()), value_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(slider(calc.term_months(), TERM_MIN, TERM_MAX, bar_width), Style::default().fg(BRAND)),
            ]),
            Line::from(Span::styled(format!("  {TERM_MIN} mois … {TERM_MAX} mois"), muted)),
            Line::from(vec![
                Span::styled("  Taux fixe         ", muted),
                Span::styled(format_rate(FIXED_ANNUAL_RATE_PERCENT), value_style),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Mensualité ", muted),
                Span::styled(format_eur(a.monthly_payment), Style::default().fg(BRAND).add_modifier(Modifier::BOLD)),
                Span::styled("   Total à rembourser ", muted),
                Span::styled(format_eur(calc.quote().total_repaid()), value_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [Entrée] Utiliser ces données pour ma demande",
                if focused {
                    Style::default().fg(Color::Black).bg(BRAND)
                } else {
                    Style::default().fg(BRAND)
                },
            )),
        ];

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_catalog(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.section_block(" Types de prêts disponibles ", Section::Catalog);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let catalog = &self.shell.catalog;
        let items: Vec<ListItem> = catalog
            .options()
            .iter()
            .map(|option| {
                let accent = option.display_color.parse::<Color>().unwrap_or(Color::White);
                ListItem::new(Text::from(vec![
                    Line::from(vec![
                        Span::styled("■ ", Style::default().fg(accent)),
                        Span::styled(option.title, Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", option.description),
                        Style::default().fg(MUTED),
                    )),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(BRAND))
            .highlight_symbol("→ ");
        let mut state = ListState::default();
        if self.focus == Section::Catalog {
            state.select(Some(catalog.cursor()));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let note = Line::from(vec![
            Span::styled(
                format!("Taux fixe de {}", format_rate(FIXED_ANNUAL_RATE_PERCENT)),
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" sur tous nos prêts", Style::default().fg(MUTED)),
        ]);
        frame.render_widget(Paragraph::new(note).alignment(Alignment::Center), chunks[1]);
    }

    fn draw_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.section_block(" Demande de prêt ", Section::Form);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)])
            .split(inner);

        let focused = self.focus == Section::Form;
        let fields = self.shell.form.fields();
        let mut lines = Vec::with_capacity(SUBMIT_ROW + 2);
        for (row, field) in FormField::ALL.into_iter().enumerate() {
            let selected = focused && self.form_row == row;
            let value = fields.get(field);
            let shown = if value.is_empty() {
                Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(value.to_string(), Style::default().fg(Color::White))
            };
            let mut spans = vec![
                Span::styled(if selected { "» " } else { "  " }, Style::default().fg(BRAND)),
                Span::styled(format!("{:<22}", format!("{} *", field.label())), Style::default().fg(MUTED)),
                shown,
            ];
            if selected && field.accepts_text() {
                spans.push(Span::styled("▏", Style::default().fg(BRAND)));
            } else if selected {
                spans.push(Span::styled("  ◂ ▸", Style::default().fg(MUTED)));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        let submitting = self.shell.form.is_submitting();
        let label = if submitting {
            " Envoi en cours... "
        } else {
            " ➤ Soumettre ma demande "
        };
        let button_style = if submitting {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        } else if focused && self.form_row == SUBMIT_ROW {
            Style::default().fg(Color::Black).bg(BRAND).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(BRAND)
        };
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(label, button_style)]));

        frame.render_widget(Paragraph::new(Text::from(lines)), cols[0]);

        let mut perks = vec![Line::from(Span::styled(
            "Avantages Atome Banque",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))];
        perks.extend(
            PERKS
                .iter()
                .map(|p| Line::from(Span::styled(*p, Style::default().fg(MUTED)))),
        );
        frame.render_widget(
            Paragraph::new(Text::from(perks))
                .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(FRAME))),
            cols[1],
        );
    }

    fn draw_help(&self, frame: &mut Frame<'_>, area: Rect) {
        let help = match self.focus {
            Section::Header => "←/→ menu  Entrée ouvrir",
            Section::Calculator => "↑/↓ curseur  ←/→ ajuster  PgUp/PgDn ×5  Entrée appliquer",
            Section::Catalog => "↑/↓ choisir  Entrée sélectionner",
            Section::Form => "↑/↓ champ  ←/→ choix  Entrée suivant/envoyer",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled("Tab section  Esc quitter", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_toast(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(toast) = self.shell.toaster.latest() else {
            return;
        };
        let width = area.width.min(56);
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + 1,
            width,
            height: 5,
        }
        .intersection(area);
        if rect.is_empty() {
            return;
        }
        let color = match toast.variant {
            ToastVariant::Default => BRAND,
            ToastVariant::Destructive => Color::Red,
        };
        let body = Paragraph::new(toast.description.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(
                        toast.title.as_str(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}

fn draw_hero(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Votre prêt en ligne ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("simple et rapide", Style::default().fg(BRAND).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!(
                "Calculez, comparez et soumettez votre demande de prêt en quelques minutes avec un taux fixe attractif de {}",
                format_rate(FIXED_ANNUAL_RATE_PERCENT)
            ),
            Style::default().fg(MUTED),
        )),
    ];
    let p = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(p, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let muted = Style::default().fg(MUTED);
    let lines = vec![
        Line::from(vec![
            Span::styled("Produits ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("Personnel · Consommation · Auto · Immobilier   ", muted),
            Span::styled("Support ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("FAQ · Contact · Rendez-vous   ", muted),
            Span::styled("Légal ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("Mentions légales · Confidentialité · CGU", muted),
        ]),
        Line::from(Span::styled(
            format!("© {} Atome Banque. Tous droits réservés.", Local::now().year()),
            muted,
        )),
        Line::from(Span::styled(
            "Taux fixes sous réserve d'acceptation du dossier.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(representative_example(), Style::default().fg(Color::Gray))),
    ];
    let p = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(FRAME)));
    frame.render_widget(p, area);
}

/// Text slider: filled up to the knob, light rule after.
fn slider(value: u32, min: u32, max: u32, width: usize) -> String {
    let span = f64::from(max.saturating_sub(min)).max(1.0);
    let ratio = (f64::from(value.saturating_sub(min)) / span).clamp(0.0, 1.0);
    let knob = (ratio * (width.saturating_sub(1)) as f64).round() as usize;
    let mut out = String::with_capacity(width * 3);
    for i in 0..width {
        out.push(match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_knob_positions() {
        assert_eq!(slider(6, 6, 120, 5), "●────");
        assert_eq!(slider(120, 6, 120, 5), "━━━━●");
        assert_eq!(slider(63, 6, 120, 5), "━━●──");
    }
}

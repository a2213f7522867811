use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEventKind, MouseEventKind};
use crossterm::{cursor, execute, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::render::column_at;
use tabledom::{render_table, Document, Element, MouseButton, NodeId};
use tablesort::{bootstrap, set_read_data_func, CellValue, TableSort};

/// Screen line the header row is drawn on.
const HEADER_LINE: u16 = 2;

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("tablesort-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::from_element(page());
    set_read_data_func(|doc, cell, _| doc.text(cell).parse::<f64>().ok().map(CellValue::Number));
    bootstrap(Some(&mut doc), TableSort::new()).expect("document is available");
    doc.mark_ready();

    let table = doc.select_str(None, "table").expect("valid selector")[0];
    let headers = doc.select_str(Some(table), "th").expect("valid selector");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;

    let result = run(&mut doc, table, &headers, &mut stdout);

    execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(doc: &mut Document, table: NodeId, headers: &[NodeId], out: &mut impl Write) -> io::Result<()> {
    loop {
        draw(doc, table, headers.len(), out)?;

        match event::read()? {
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(c) => {
                    let header = c
                        .to_digit(10)
                        .and_then(|n| (n as usize).checked_sub(1))
                        .and_then(|i| headers.get(i));
                    if let Some(&th) = header {
                        doc.mouse_down(th, MouseButton::Left);
                    }
                }
                _ => {}
            },
            CtEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(button) = mouse.kind {
                    if mouse.row != HEADER_LINE {
                        continue;
                    }
                    let header = column_at(doc, table, mouse.column as usize).and_then(|col| headers.get(col));
                    if let Some(&th) = header {
                        doc.mouse_down(th, button.into());
                    }
                }
            }
            _ => {}
        }
    }
}

fn draw(doc: &Document, table: NodeId, columns: usize, out: &mut impl Write) -> io::Result<()> {
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    write!(out, "{}\r\n\r\n", prompt(columns))?;
    for line in render_table(doc, table).lines() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

fn prompt(columns: usize) -> String {
    match columns {
        0 => "Nothing to sort, 'q' to quit".to_string(),
        1 => "Press 1 or click the header to sort, 'q' to quit".to_string(),
        n => format!("Press 1-{} or click a header to sort, 'q' to quit", n.min(9)),
    }
}

fn page() -> Element {
    let rows = [
        ("pear", "12", "0.80"),
        ("apple", "7", "1.20"),
        ("fig", "30", "2.75"),
        ("banana", "7", "0.25"),
        ("cherry", "120", "4.00"),
    ];

    Element::div().child(
        Element::table()
            .flag("table-sort")
            .child(
                Element::thead().child(
                    Element::tr()
                        .child(Element::th("Fruit"))
                        .child(Element::th("Stock"))
                        .child(Element::th("Price")),
                ),
            )
            .child(Element::tbody().children(rows.iter().map(|(name, stock, price)| {
                Element::tr()
                    .child(Element::td(*name))
                    .child(Element::td(*stock))
                    .child(Element::td(*price))
            }))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_available_columns() {
        assert_eq!(prompt(3), "Press 1-3 or click a header to sort, 'q' to quit");
        assert_eq!(prompt(5), "Press 1-5 or click a header to sort, 'q' to quit");
        assert_eq!(prompt(12), "Press 1-9 or click a header to sort, 'q' to quit");
        assert_eq!(prompt(1), "Press 1 or click the header to sort, 'q' to quit");
    }
}

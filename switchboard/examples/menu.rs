//! Terminal demo driving a menu, a pager and toasts from crossterm key events.
//!
//! m: open/close the menu, arrows/enter/space/esc: navigate it,
//! left/right: change page, q: quit. Logs go to `menu.log`.

use std::fs::File;
use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use simplelog::{Config, LevelFilter, WriteLogger};

use switchboard::prelude::*;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("menu.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let toaster = Toaster::new(ToastConfig::new().default_duration(Duration::from_secs(2)));
    let menu = Menu::new();
    for label in ["Open", "Save"] {
        let toaster = toaster.clone();
        menu.attach(label, move || {
            let _ = toaster.push(Toast::new(format!("{label} selected")));
        })
        .expect("menu is mounted");
    }
    menu.attach_disabled("Delete").expect("menu is mounted");

    let pager = Pager::new(12);

    terminal::enable_raw_mode()?;
    let result = run(&menu, &pager, &toaster);
    terminal::disable_raw_mode()?;

    menu.unmount();
    toaster.unmount();
    result
}

fn run(menu: &Menu<&'static str>, pager: &Pager, toaster: &Toaster) -> std::io::Result<()> {
    loop {
        draw(menu, pager, toaster)?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('m') => menu.toggle().expect("menu is mounted"),
            KeyCode::Left => {
                pager.previous();
            }
            KeyCode::Right => {
                pager.next();
            }
            code => {
                if let Ok(nav) = NavKey::try_from(code) {
                    let result = menu.on_key(nav).expect("menu is mounted");
                    log::debug!("{nav:?} -> {result:?}");
                }
            }
        }
    }
}

fn draw(menu: &Menu<&'static str>, pager: &Pager, toaster: &Toaster) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let active = menu.active_index().expect("menu is mounted");
    write!(out, "[m] Menu {}\r\n", if menu.is_open() { "v" } else { ">" })?;
    if menu.is_open() {
        let items = menu.items().with_items(|items| items.to_vec());
        for (index, item) in items.iter().enumerate() {
            let marker = if active == Some(index) { '*' } else { ' ' };
            let state = if item.disabled { " (disabled)" } else { "" };
            write!(out, "  {marker} {}{state}\r\n", item.id)?;
        }
    }

    write!(out, "\r\nPage {} of {}: ", pager.page(), pager.total_pages())?;
    for slot in pager.window() {
        match slot {
            PageItem::Page(page) if page == pager.page() => write!(out, "[{page}] ")?,
            PageItem::Page(page) => write!(out, "{page} ")?,
            PageItem::Ellipsis => write!(out, "... ")?,
        }
    }
    write!(out, "\r\n\r\n")?;

    for toast in toaster.toasts() {
        write!(out, "({:?}) {}\r\n", toast.level, toast.message)?;
    }
    out.flush()
}

//! 端末のセットアップと後始末、イベントのポーリング

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{self, stdout, Stdout};
use std::time::Duration;

/// ratatui の Terminal のラッパー
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// イベント待ちのタイムアウト
    pub tick_rate: Duration,
    entered: bool,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            entered: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// 代替スクリーンに入り raw モードを有効化
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    /// ターミナルを復元
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        self.entered = false;
        Ok(())
    }

    /// tick_rate だけイベントを待つ（押下以外のキーイベントは捨てる）
    pub fn next_event(&self) -> io::Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            event => Ok(Some(event)),
        }
    }

    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

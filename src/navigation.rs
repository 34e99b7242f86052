// File: ./src/navigation.rs
// Stack navigation between the app's screens, and the splash delay task.
use strum::{Display, EnumIter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Screen {
    Splash,
    Login,
    Register,
    Home,
}

/// Screen stack. Never empty.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new(initial: Screen) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> Screen {
        // The stack always holds the initial screen or its replacement.
        self.stack.last().copied().unwrap_or(Screen::Splash)
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Swaps the top screen for `screen`.
    pub fn replace(&mut self, screen: Screen) {
        self.stack.pop();
        self.stack.push(screen);
    }

    /// Goes to `screen`: pops back to it if it is already on the stack,
    /// pushes it otherwise.
    pub fn navigate(&mut self, screen: Screen) {
        if let Some(pos) = self.stack.iter().rposition(|s| *s == screen) {
            self.stack.truncate(pos + 1);
        } else {
            self.stack.push(screen);
        }
    }

    /// Pops the top screen. Returns false when only one screen is left.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::Splash)
    }
}

/// Delivers one message after a delay, unless cancelled first.
///
/// Dropping the timer cancels it, so a screen that is torn down early never
/// receives the transition.
#[derive(Debug)]
pub struct SplashTimer {
    handle: Option<JoinHandle<()>>,
}

impl SplashTimer {
    pub fn start<T: Send + 'static>(delay: Duration, tx: mpsc::Sender<T>, message: T) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(message).await.is_err() {
                log::debug!("Splash timer fired after the UI closed");
            }
        });
        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SplashTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_pops_back_to_existing() {
        let mut nav = Navigator::new(Screen::Login);
        nav.navigate(Screen::Register);
        assert_eq!(nav.stack(), &[Screen::Login, Screen::Register]);
        nav.navigate(Screen::Login);
        assert_eq!(nav.stack(), &[Screen::Login]);
    }

    #[test]
    fn test_replace_and_back() {
        let mut nav = Navigator::default();
        nav.replace(Screen::Login);
        assert_eq!(nav.stack(), &[Screen::Login]);
        assert!(!nav.go_back());
        nav.navigate(Screen::Register);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Screen::Login);
    }
}

// src/cli/login.rs
use std::io::{self, BufRead, Write};

use inquire::{InquireError, Password, Text};
use thiserror::Error;

use crate::crypto::DigestEngine;
use crate::importers::CredentialStore;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Login aborted: no more input")]
    Aborted,

    #[error("Too many failed attempts ({0})")]
    TooManyAttempts(usize),
}

pub type Result<T> = std::result::Result<T, LoginError>;

/// Source of user input and sink for session messages.
pub trait Prompter {
    /// `None` when input is exhausted or the user cancelled.
    fn ask_username(&mut self) -> Result<Option<String>>;
    fn ask_password(&mut self) -> Result<Option<String>>;
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Terminal prompter; the password is read without echo.
pub struct TerminalPrompter;

fn cancelled_to_none(result: std::result::Result<String, InquireError>) -> Result<Option<String>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(LoginError::Prompt(e.to_string())),
    }
}

impl Prompter for TerminalPrompter {
    fn ask_username(&mut self) -> Result<Option<String>> {
        cancelled_to_none(Text::new("Enter username:").prompt())
    }

    fn ask_password(&mut self) -> Result<Option<String>> {
        cancelled_to_none(
            Password::new("Enter password:")
                .with_display_mode(inquire::PasswordDisplayMode::Hidden)
                .without_confirmation()
                .prompt(),
        )
    }

    fn say(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Plain line-based prompter, for piped input and tests.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask_username(&mut self) -> Result<Option<String>> {
        self.ask("Enter username: ")
    }

    fn ask_password(&mut self) -> Result<Option<String>> {
        self.ask("Enter password: ")
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    UnknownUser,
    WrongPassword,
}

impl RetryReason {
    fn message(&self) -> &'static str {
        match self {
            RetryReason::UnknownUser => "Username not found. Please try again.",
            RetryReason::WrongPassword => "Incorrect password. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    PromptingUser,
    PromptingPassword { username: String },
    Verifying { username: String, password: String },
    Retry(RetryReason),
    Success { username: String },
}

/// Interactive login against a [`CredentialStore`].
///
/// Each call to [`LoginSession::step`] performs exactly one transition; `run`
/// drives the machine until the user is authenticated or input runs out.
pub struct LoginSession<'a, P> {
    store: &'a CredentialStore,
    engine: DigestEngine,
    prompter: P,
    max_attempts: usize,
    failures: usize,
}

impl<'a, P: Prompter> LoginSession<'a, P> {
    pub fn new(store: &'a CredentialStore, engine: DigestEngine, prompter: P) -> Self {
        Self {
            store,
            engine,
            prompter,
            max_attempts: 0,
            failures: 0,
        }
    }

    /// Give up after `max_attempts` failures. Zero means never.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    pub fn step(&mut self, state: LoginState) -> Result<LoginState> {
        match state {
            LoginState::PromptingUser => {
                let username = self.prompter.ask_username()?.ok_or(LoginError::Aborted)?;
                let username = username.trim().to_string();
                if self.store.contains(&username) {
                    Ok(LoginState::PromptingPassword { username })
                } else {
                    log::debug!("Unknown username {:?}", username);
                    Ok(LoginState::Retry(RetryReason::UnknownUser))
                }
            }
            LoginState::PromptingPassword { username } => {
                let password = self.prompter.ask_password()?.ok_or(LoginError::Aborted)?;
                Ok(LoginState::Verifying {
                    username,
                    password: password.trim().to_string(),
                })
            }
            LoginState::Verifying { username, password } => {
                let digest = self.engine.hash_password(&password);
                if self.store.lookup(&username) == Some(digest.as_str()) {
                    Ok(LoginState::Success { username })
                } else {
                    log::debug!("Digest mismatch for {:?}", username);
                    Ok(LoginState::Retry(RetryReason::WrongPassword))
                }
            }
            LoginState::Retry(reason) => {
                self.prompter.say(reason.message())?;
                self.failures += 1;
                if self.max_attempts > 0 && self.failures >= self.max_attempts {
                    log::warn!("Giving up after {} failed login attempts", self.failures);
                    return Err(LoginError::TooManyAttempts(self.failures));
                }
                Ok(LoginState::PromptingUser)
            }
            done @ LoginState::Success { .. } => Ok(done),
        }
    }

    /// Returns the authenticated username.
    pub fn run(&mut self) -> Result<String> {
        let mut state = LoginState::PromptingUser;
        loop {
            state = self.step(state)?;
            if let LoginState::Success { username } = &state {
                self.prompter.say("Login successful!")?;
                log::info!("User {:?} logged in", username);
                return Ok(username.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash_password;
    use std::io::Cursor;

    fn store() -> CredentialStore {
        [("alice".to_string(), hash_password("S3cret-Pass").to_string())]
            .into_iter()
            .collect()
    }

    fn session<'a>(
        store: &'a CredentialStore,
        input: &str,
    ) -> LoginSession<'a, LinePrompter<Cursor<Vec<u8>>, Vec<u8>>> {
        let prompter = LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        LoginSession::new(store, DigestEngine::default(), prompter)
    }

    fn transcript<R: BufRead>(session: LoginSession<'_, LinePrompter<R, Vec<u8>>>) -> String {
        String::from_utf8(session.into_prompter().into_output()).unwrap()
    }

    #[test]
    fn transitions_are_explicit() {
        let store = store();
        let mut session = session(&store, " alice \nS3cret-Pass\n");

        let state = session.step(LoginState::PromptingUser).unwrap();
        assert_eq!(state, LoginState::PromptingPassword { username: "alice".into() });

        let state = session.step(state).unwrap();
        assert_eq!(
            state,
            LoginState::Verifying {
                username: "alice".into(),
                password: "S3cret-Pass".into()
            }
        );

        let state = session.step(state).unwrap();
        assert_eq!(state, LoginState::Success { username: "alice".into() });
    }

    #[test]
    fn retries_until_success() {
        let store = store();
        let mut session = session(&store, "bob\nalice\nwrong\nalice\nS3cret-Pass\n");
        assert_eq!(session.run().unwrap(), "alice");
        assert_eq!(session.failures(), 2);

        let out = transcript(session);
        assert!(out.contains("Username not found. Please try again."));
        assert!(out.contains("Incorrect password. Please try again."));
        assert!(out.ends_with("Login successful!\n"));
    }

    #[test]
    fn end_of_input_aborts() {
        let store = store();
        let mut session = session(&store, "alice\n");
        assert!(matches!(session.run(), Err(LoginError::Aborted)));
    }

    #[test]
    fn attempt_limit_is_enforced() {
        let store = store();
        let mut session = session(&store, "x\ny\nz\n").with_max_attempts(2);
        assert!(matches!(session.run(), Err(LoginError::TooManyAttempts(2))));
    }

    #[test]
    fn empty_store_rejects_everyone() {
        let store = CredentialStore::default();
        let mut session = session(&store, "alice\n");
        assert!(matches!(session.run(), Err(LoginError::Aborted)));
        assert_eq!(session.failures(), 1);
    }
}

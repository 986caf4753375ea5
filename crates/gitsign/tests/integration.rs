//! Integration tests for the signing config writer

use dockyard_config::{Config, HomeLayout};
use dockyard_errors::Error;
use dockyard_events::{AppEvent, GitConfigEvent};
use dockyard_gitsign::{
    IncludeStatus, Prompter, SigningSetup, PROMPT_EMAIL, PROMPT_KEY, PROMPT_NAME,
    PROMPT_SCOPE_DIR,
};
use dockyard_platform::{Platform, PlatformContext};
use std::collections::VecDeque;
use tempfile::TempDir;

/// Replays canned answers and remembers the questions
struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str) -> Result<String, Error> {
        self.asked.push(label.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::internal("ran out of answers"))
    }
}

fn setup(home: &TempDir) -> SigningSetup {
    SigningSetup::new(
        Config::default(),
        HomeLayout::new(home.path()),
        Platform::current(),
    )
}

#[tokio::test]
async fn writes_fragment_and_include_into_empty_config() {
    let home = TempDir::new().unwrap();
    let work = home.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let mut prompter = ScriptedPrompter::new(&["", "~/work", "", "KEY42", "Ada", ""]);

    let outcome = setup(&home)
        .run(&mut prompter, &PlatformContext::default(), home.path())
        .await
        .unwrap();

    assert_eq!(
        prompter.asked,
        vec![
            PROMPT_SCOPE_DIR,
            PROMPT_SCOPE_DIR,
            PROMPT_KEY,
            PROMPT_KEY,
            PROMPT_NAME,
            PROMPT_EMAIL
        ]
    );
    assert_eq!(outcome.include, IncludeStatus::Appended);

    let canonical = std::fs::canonicalize(&work).unwrap();
    let fragment = home.path().join(".gitconfig-work");
    assert_eq!(outcome.fragment_path, fragment);
    assert_eq!(
        std::fs::read_to_string(&fragment).unwrap(),
        "[user]\n\tsigningkey = KEY42\n\tname = Ada\n[commit]\n\tgpgsign = true\n"
    );

    let global = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert_eq!(
        global,
        format!(
            "\n[includeIf \"gitdir:{}/\"]\n\tpath = {}\n",
            canonical.display(),
            fragment.display()
        )
    );
}

#[tokio::test]
async fn rerun_does_not_duplicate_include() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir(home.path().join("src")).unwrap();
    std::fs::write(home.path().join(".gitconfig"), "[core]\n\teditor = vim\n").unwrap();
    let ctx = PlatformContext::default();

    let mut first = ScriptedPrompter::new(&["~/src", "OLDKEY", "", ""]);
    setup(&home).run(&mut first, &ctx, home.path()).await.unwrap();

    // same directory spelled with a trailing slash
    let absolute = format!("{}/src/", home.path().display());
    let mut second = ScriptedPrompter::new(&[absolute.as_str(), "NEWKEY", "", "ada@example.com"]);
    let outcome = setup(&home).run(&mut second, &ctx, home.path()).await.unwrap();

    assert_eq!(outcome.include, IncludeStatus::AlreadyPresent);
    let global = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert!(global.starts_with("[core]\n\teditor = vim\n\n[includeIf"));
    assert_eq!(global.matches("[includeIf").count(), 1);

    // fragment is overwritten with the latest answers
    let fragment = std::fs::read_to_string(home.path().join(".gitconfig-src")).unwrap();
    assert!(fragment.contains("signingkey = NEWKEY"));
    assert!(fragment.contains("\temail = ada@example.com\n"));
    assert!(!fragment.contains("OLDKEY"));
}

#[tokio::test]
async fn nonexistent_directory_is_made_absolute() {
    let home = TempDir::new().unwrap();
    let (tx, mut rx) = dockyard_events::channel();
    let ctx = PlatformContext::new(Some(tx));
    let mut prompter = ScriptedPrompter::new(&["projects/../clients", "KEY", "", ""]);

    let outcome = setup(&home).run(&mut prompter, &ctx, home.path()).await.unwrap();

    let canonical_home = std::fs::canonicalize(home.path()).unwrap();
    assert_eq!(outcome.scope_dir, canonical_home.join("clients"));
    assert_eq!(outcome.fragment_path, home.path().join(".gitconfig-clients"));

    let mut saw_append = false;
    while let Ok(message) = rx.try_recv() {
        if let AppEvent::GitConfig(GitConfigEvent::IncludeAppended { .. }) = message.event {
            saw_append = true;
        }
    }
    assert!(saw_append);
}

#[tokio::test]
async fn symlinked_parent_of_missing_directory_is_resolved() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    std::os::unix::fs::symlink(data.path(), home.path().join("link")).unwrap();
    let mut prompter = ScriptedPrompter::new(&["~/link/new/repos", "KEY", "", ""]);

    let outcome = setup(&home)
        .run(&mut prompter, &PlatformContext::default(), home.path())
        .await
        .unwrap();

    let target = std::fs::canonicalize(data.path()).unwrap().join("new/repos");
    assert_eq!(outcome.scope_dir, target);
    assert_eq!(outcome.fragment_path, home.path().join(".gitconfig-repos"));
    let global = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert!(global.contains(&format!("gitdir:{}/", target.display())));
}

#[tokio::test]
async fn prompt_failure_is_fatal() {
    let home = TempDir::new().unwrap();
    let mut prompter = ScriptedPrompter::new(&["~/src"]);

    let result = setup(&home)
        .run(&mut prompter, &PlatformContext::default(), home.path())
        .await;

    assert!(result.is_err());
    assert!(!home.path().join(".gitconfig").exists());
}

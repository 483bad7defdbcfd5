//! Bot façade: routes inbound text and quiz selections to replies.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogStore, SongField};
use crate::commands::{classify, Command};
use crate::config::{Config, ReplyConfig};
use crate::error::{Result, SongbotError};
use crate::matcher::{Resolution, Resolver};
use crate::quiz::{QuizEngine, SessionCodec};
use crate::reply::Reply;

/// Song lookup and lyrics quiz bot.
///
/// Cheap to clone; clones share the catalog store, so a reload through any
/// clone is seen by all of them.
#[derive(Debug, Clone)]
pub struct SongBot {
    store: CatalogStore,
    resolver: Resolver,
    quiz: QuizEngine,
    trigger: String,
    reply: ReplyConfig,
}

impl SongBot {
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        Self {
            store: CatalogStore::new(catalog),
            resolver: Resolver::new(config.matcher.clone()),
            quiz: QuizEngine::new(
                config.quiz.clone(),
                SessionCodec::new(config.session.secret.clone()),
            ),
            trigger: config.quiz.trigger.clone(),
            reply: config.reply.clone(),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn reply_config(&self) -> &ReplyConfig {
        &self.reply
    }

    /// Current catalog snapshot.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.store.snapshot().await
    }

    /// Titles matching `query` in the current catalog.
    pub async fn resolve(&self, query: &str) -> Vec<String> {
        let catalog = self.store.snapshot().await;
        self.resolver.resolve(catalog.index(), query)
    }

    /// Answer an inbound text message.
    pub async fn handle_text(&self, text: &str) -> Result<Reply> {
        let catalog = self.store.snapshot().await;
        match classify(text, &self.trigger) {
            Command::Quiz => {
                info!("Starting quiz");
                let turn = self.quiz.start(&catalog)?;
                Ok(Reply::Quiz {
                    turn,
                    restarted: false,
                })
            }
            Command::Lookup { field, query } => Ok(self.lookup(&catalog, field, &query)),
        }
    }

    /// Answer a quiz option pick. `chosen` is the picked title when the
    /// transport echoes it back.
    ///
    /// A token that cannot be decoded starts a fresh session instead of
    /// failing the request.
    pub async fn handle_selection(&self, token: &str, chosen: Option<&str>) -> Result<Reply> {
        let catalog = self.store.snapshot().await;
        match self.quiz.advance(&catalog, token, chosen) {
            Ok(turn) => Ok(Reply::Quiz {
                turn,
                restarted: false,
            }),
            Err(SongbotError::MalformedSessionState(reason)) => {
                warn!(reason = %reason, "Malformed quiz token, restarting quiz");
                let turn = self.quiz.start(&catalog)?;
                Ok(Reply::Quiz {
                    turn,
                    restarted: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Load the catalog at `path` and swap it in. On error the current
    /// catalog stays in place.
    pub async fn reload(&self, path: &Path) -> Result<usize> {
        let catalog = Catalog::load(path)?;
        let songs = catalog.len();
        self.store.install(catalog).await;
        Ok(songs)
    }

    fn lookup(&self, catalog: &Catalog, field: SongField, query: &str) -> Reply {
        let resolution = self.resolver.resolution(catalog.index(), query);
        debug!(query, ?field, matches = resolution.titles().len(), "Lookup");
        match resolution {
            Resolution::NotFound => Reply::NotFound,
            Resolution::Resolved(title) => match catalog.get(&title) {
                Some(song) => Reply::for_song(song, field),
                None => Reply::NotFound,
            },
            Resolution::Ambiguous(titles) => {
                Reply::candidates(&titles, field, self.reply.label_max_chars)
            }
        }
    }
}

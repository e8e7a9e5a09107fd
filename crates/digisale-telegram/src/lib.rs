// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram front end for the Digisale sales bot.
//!
//! Drives the two-step sale dialog (category button, product button, one
//! free-text submission) over long polling via teloxide, and answers the
//! `/summary` command. One update is handled to completion per chat; the
//! injected [`SessionStore`] holds the only conversation state.

pub mod dialog;
pub mod keyboard;
pub mod markdown;
pub mod session;

use std::sync::Arc;

use chrono::Local;
use digisale_config::model::TelegramConfig;
use digisale_core::DigisaleError;
use digisale_storage::{Database, queries};
use metrics::counter;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use keyboard::CallbackAction;
use session::{PendingSale, SessionStore};

/// Bot commands registered with Telegram.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Digisale commands:")]
pub enum Command {
    #[command(description = "choose a category and record a sale")]
    Start,
    #[command(description = "daily totals, optionally for YYYY-MM-DD")]
    Summary(String),
    #[command(description = "discard the entry in progress")]
    Cancel,
}

/// Shared handler dependencies, injected through the dispatcher.
#[derive(Clone)]
struct BotState {
    db: Arc<Database>,
    sessions: SessionStore,
    currency: String,
}

/// The Telegram sales bot.
pub struct SalesBot {
    bot: Bot,
    state: BotState,
}

impl SalesBot {
    /// Creates the bot. Requires `config.bot_token` to be set.
    pub fn new(
        config: &TelegramConfig,
        db: Arc<Database>,
        currency: &str,
    ) -> Result<Self, DigisaleError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            DigisaleError::Config("telegram.bot_token is required to run the bot".into())
        })?;
        if token.is_empty() {
            return Err(DigisaleError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
            state: BotState {
                db,
                sessions: SessionStore::new(),
                currency: currency.to_string(),
            },
        })
    }

    /// Registers the command menu and runs long polling until shutdown.
    pub async fn run(self) -> Result<(), DigisaleError> {
        self.bot
            .set_my_commands(Command::bot_commands())
            .await
            .map_err(|e| DigisaleError::Channel {
                message: format!("failed to register bot commands: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!("starting Telegram long polling");

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(on_command),
            )
            .branch(Update::filter_callback_query().endpoint(on_callback))
            .branch(Update::filter_message().endpoint(on_text));

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.state])
            .default_handler(|_| async {}) // Silently ignore other update kinds
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, state: BotState) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, "Choose a category:")
                .reply_markup(keyboard::category_keyboard())
                .await?;
        }
        Command::Summary(arg) => {
            send_summary(&bot, &msg, &arg, &state).await?;
        }
        Command::Cancel => {
            let reply = if state.sessions.clear(msg.chat.id.0) {
                "Entry cancelled."
            } else {
                "Nothing to cancel."
            };
            bot.send_message(msg.chat.id, reply).await?;
        }
    }
    Ok(())
}

/// `/summary [YYYY-MM-DD]`: validate the date before touching storage, then
/// report totals, falling back to plain text if MarkdownV2 delivery fails.
async fn send_summary(bot: &Bot, msg: &Message, arg: &str, state: &BotState) -> ResponseResult<()> {
    counter!("digisale_summary_requests_total").increment(1);

    let today = Local::now().date_naive();
    let date = match dialog::resolve_summary_date(arg, today) {
        Ok(date) => date,
        Err(_) => {
            bot.send_message(msg.chat.id, "Invalid date format. Use /summary YYYY-MM-DD")
                .await?;
            return Ok(());
        }
    };

    match queries::sales::daily_totals(&state.db, date).await {
        Ok(totals) => {
            let rendered = dialog::format_summary_markdown(date, totals, &state.currency);
            match bot
                .send_message(msg.chat.id, &rendered)
                .parse_mode(ParseMode::MarkdownV2)
                .await
            {
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "MarkdownV2 failed, sending as plain text");
                    bot.send_message(
                        msg.chat.id,
                        dialog::format_summary_plain(date, totals, &state.currency),
                    )
                    .await?;
                }
            }
        }
        Err(e) => {
            error!(error = %e, "summary query failed");
            bot.send_message(msg.chat.id, "Failed to fetch summary.")
                .await?;
        }
    }
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, state: BotState) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(keyboard::parse_callback) else {
        return Ok(());
    };
    let Some(msg) = q.regular_message() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match action {
        CallbackAction::Category(category) => {
            match queries::products::list_product_names(&state.db, category).await {
                Ok(names) if names.is_empty() => {
                    bot.edit_message_text(
                        chat_id,
                        msg.id,
                        format!("No {category} products available."),
                    )
                    .await?;
                }
                Ok(names) => {
                    bot.edit_message_text(chat_id, msg.id, format!("Select a {category} product:"))
                        .reply_markup(keyboard::product_keyboard(category, &names))
                        .await?;
                }
                Err(e) => {
                    error!(error = %e, "product listing failed");
                    bot.edit_message_text(chat_id, msg.id, "Failed to load products.")
                        .await?;
                }
            }
        }
        CallbackAction::Product { category, name } => {
            // No re-entry while a pending entry awaits its text submission.
            if state.sessions.is_awaiting(chat_id.0) {
                bot.send_message(chat_id, dialog::PENDING_ENTRY).await?;
                return Ok(());
            }
            match queries::products::get_product(&state.db, &name, category).await {
                Ok(Some(product)) => {
                    state
                        .sessions
                        .begin(chat_id.0, PendingSale { category, product });
                    bot.edit_message_text(chat_id, msg.id, dialog::prompt_for(category))
                        .await?;
                }
                Ok(None) => {
                    // Stale keyboard; stay idle rather than opening a half session.
                    bot.edit_message_text(chat_id, msg.id, dialog::PRODUCT_NOT_FOUND)
                        .await?;
                }
                Err(e) => {
                    error!(error = %e, "product lookup failed");
                    bot.edit_message_text(chat_id, msg.id, "Failed to load product.")
                        .await?;
                }
            }
        }
    }
    Ok(())
}

/// Free-text submission handler. Any message while a session is pending
/// counts as the one allowed submission, so non-text input (a sticker, a
/// photo) consumes the session and is rejected as invalid.
async fn on_text(bot: Bot, msg: Message, state: BotState) -> ResponseResult<()> {
    // The session is cleared up front: one submission per entry, no matter
    // how it turns out.
    let Some(pending) = state.sessions.take(msg.chat.id.0) else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, dialog::INVALID_INPUT).await?;
        return Ok(());
    };

    let seller = msg
        .from
        .as_ref()
        .and_then(|u| u.username.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let today = Local::now().date_naive();

    match dialog::handle_submission(&pending.product, pending.category, text, &seller, today) {
        Ok(sale) => match queries::sales::insert_sale(&state.db, &sale).await {
            Ok(()) => {
                counter!(
                    "digisale_sales_recorded_total",
                    "category" => sale.category().to_string()
                )
                .increment(1);
                bot.send_message(msg.chat.id, dialog::confirmation(&sale, &state.currency))
                    .await?;
            }
            Err(e) => {
                error!(error = %e, "failed to persist sale");
                bot.send_message(msg.chat.id, "Failed to save the sale.")
                    .await?;
            }
        },
        Err(e) => {
            info!(error = %e, "rejected sale submission");
            bot.send_message(msg.chat.id, dialog::INVALID_INPUT).await?;
        }
    }
    Ok(())
}

use anyhow::Result;
use teloxide::{
    ApiError, Bot, RequestError,
    prelude::*,
    types::{ChatId, Message, ParseMode, User},
    utils::html,
};

use crate::dependencies::BotDependencies;
use crate::summarize::args::{Parsed, lex, parse_flags};
use crate::summarize::error::TldrError;
use crate::summarize::fetch::fetch_window;
use crate::summarize::helpers::{HELP_TEXT, build_summary_prompt, render_transcript};

/// The `/tldr` pipeline: lex, parse, fetch, assemble, summarize, deliver.
/// Every stage failure is reported to the requester right here; only faults
/// in reporting itself bubble up to the command-error hook.
pub async fn handle_tldr(
    bot: Bot,
    msg: Message,
    arg_string: &str,
    bot_deps: BotDependencies,
) -> Result<()> {
    if arg_string.trim().is_empty() {
        return send_help(&bot, msg.chat.id).await;
    }

    let tokens = match lex(arg_string) {
        Ok(tokens) => tokens,
        Err(e) => return report(&bot, msg.chat.id, &e).await,
    };

    let request = match parse_flags(&tokens) {
        Ok(Parsed::Help) => return send_help(&bot, msg.chat.id).await,
        Ok(Parsed::Request(request)) => request,
        Err(e) => return report(&bot, msg.chat.id, &e).await,
    };

    let window = match fetch_window(
        bot_deps.history.as_ref(),
        msg.chat.id,
        &request.window,
        bot_deps.bot_user_id,
    )
    .await
    {
        Ok(window) => window,
        Err(e) => return report(&bot, msg.chat.id, &e).await,
    };

    let prompt = build_summary_prompt(
        &render_transcript(&window),
        request.custom_prompt.as_deref(),
    );

    let summary = match bot_deps.ai.summarize(&prompt).await {
        Ok(summary) => summary,
        Err(e) => return report(&bot, msg.chat.id, &TldrError::Summarization(e)).await,
    };

    deliver(&bot, &msg, &summary, request.post_publicly).await
}

pub async fn send_help(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, HELP_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Surface one failure to the requester. Low-level faults get logged for
/// operator diagnosis before the generic reply goes out.
async fn report(bot: &Bot, chat_id: ChatId, error: &TldrError) -> Result<()> {
    match error {
        TldrError::Fetch(inner) => log::error!("history fetch failed: {inner:#}"),
        TldrError::Summarization(inner) => log::error!("summarization failed: {inner:#}"),
        e if !e.is_informational() => log::debug!("tldr request rejected: {e}"),
        _ => {}
    }
    bot.send_message(chat_id, error.user_message()).await?;
    Ok(())
}

/// Either post into the originating chat or DM the requester. A DM rejected
/// by the recipient's privacy settings is terminal for the invocation.
async fn deliver(bot: &Bot, msg: &Message, summary: &str, post_publicly: bool) -> Result<()> {
    if post_publicly {
        let attribution = msg
            .from
            .as_ref()
            .map(mention)
            .unwrap_or_else(|| "anonymous".to_owned());
        let text = format!(
            "📄 <b>TLDR Summary</b>\n\n{}\n\n<i>Requested by {}</i>",
            html::escape(summary),
            attribution
        );
        bot.send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        // anonymous senders have no DM target
        return report(bot, msg.chat.id, &TldrError::PrivateDeliveryBlocked).await;
    };

    let origin = msg.chat.title().unwrap_or("this chat");
    let text = format!(
        "📄 <b>TLDR Summary</b>\n\n{}\n\n<i>Requested in {}</i>",
        html::escape(summary),
        html::escape(origin)
    );

    match bot
        .send_message(ChatId(user.id.0 as i64), text)
        .parse_mode(ParseMode::Html)
        .await
    {
        Ok(_) => Ok(()),
        Err(e) if is_dm_blocked(&e) => {
            report(bot, msg.chat.id, &TldrError::PrivateDeliveryBlocked).await
        }
        Err(e) => Err(e.into()),
    }
}

/// The recipient's settings (or a block) prevent the DM; anything else is a
/// plain transport fault.
fn is_dm_blocked(err: &RequestError) -> bool {
    matches!(
        err,
        RequestError::Api(
            ApiError::CantInitiateConversation | ApiError::BotBlocked | ApiError::UserDeactivated,
        )
    )
}

fn mention(user: &User) -> String {
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user.id.0,
        html::escape(&user.first_name)
    )
}

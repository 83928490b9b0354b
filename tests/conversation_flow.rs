//! End-to-end conversation scenarios against the public engine API.

use std::collections::HashSet;
use std::time::Duration;

use cosmo_assist::config::EngineConfig;
use cosmo_assist::conversation::{Conversation, ConversationEvent, SubmitOutcome};
use cosmo_assist::rules::RuleTable;
use cosmo_assist::transcript::{Message, Sender};

fn test_config() -> EngineConfig {
    EngineConfig {
        typing_delay_min: Duration::from_millis(800),
        typing_delay_max: Duration::from_millis(1800),
        ..EngineConfig::default()
    }
}

/// Submit input and wait for the turn to resolve, returning the bot reply.
async fn complete_turn(convo: &mut Conversation, input: &str) -> Message {
    let mut events = convo.subscribe();
    let outcome = convo.submit(input).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Accepted);
    loop {
        let ConversationEvent::MessageAppended { message } = events.recv().await.unwrap();
        if message.sender == Sender::Bot {
            return message;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn completed_turn_adds_exactly_two_messages() {
    let mut convo = Conversation::new(test_config());
    let before = convo.messages().await.len();

    complete_turn(&mut convo, "tell me about malware").await;

    let after = convo.messages().await;
    assert_eq!(after.len(), before + 2);
    assert_eq!(after[before].sender, Sender::User);
    assert_eq!(after[before + 1].sender, Sender::Bot);
}

#[tokio::test(start_paused = true)]
async fn phishing_question_gets_phishing_answer() {
    let mut convo = Conversation::new(test_config());
    let reply = complete_turn(&mut convo, "What is phishing?").await;
    assert!(reply.text.contains("Phishing is when attackers"));
}

#[tokio::test(start_paused = true)]
async fn password_question_mentions_length() {
    let mut convo = Conversation::new(test_config());
    let reply = complete_turn(&mut convo, "how do I make a strong password").await;
    assert!(reply.text.contains("12 characters"));
}

#[tokio::test(start_paused = true)]
async fn gibberish_gets_the_fallback() {
    let mut convo = Conversation::new(test_config());
    let reply = complete_turn(&mut convo, "asdkjhasd").await;
    assert_eq!(reply.text, RuleTable::default_rules().fallback());
}

#[tokio::test(start_paused = true)]
async fn second_submit_during_pending_turn_is_ignored() {
    let mut convo = Conversation::new(test_config());
    let mut events = convo.subscribe();

    convo.submit("What is phishing?").await.unwrap();
    let outcome = convo.submit("do I need a vpn?").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::RejectedBusy);
    assert_eq!(convo.messages().await.len(), 2);

    // The first turn still resolves normally and only that turn's reply lands.
    events.recv().await.unwrap(); // user append
    let ConversationEvent::MessageAppended { message } = events.recv().await.unwrap();
    assert!(message.text.contains("Phishing is when attackers"));
    assert_eq!(convo.messages().await.len(), 3);
    assert!(!convo.is_awaiting_reply().await);
}

#[tokio::test(start_paused = true)]
async fn teardown_mid_delay_drops_the_reply() {
    let mut convo = Conversation::new(test_config());
    convo.submit("What is phishing?").await.unwrap();
    assert!(convo.is_awaiting_reply().await);

    convo.close();

    // Even long after the original delay would have elapsed, no bot message.
    tokio::time::sleep(Duration::from_secs(30)).await;
    let messages = convo.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages.last().unwrap().sender, Sender::User);
}

#[tokio::test(start_paused = true)]
async fn transcript_ids_unique_and_timestamps_ordered() {
    let mut convo = Conversation::new(test_config());
    for input in [
        "What is phishing?",
        "how do I make a strong password",
        "what is social engineering",
        "random nonsense here",
    ] {
        complete_turn(&mut convo, input).await;
    }

    let messages = convo.messages().await;
    assert_eq!(messages.len(), 9); // greeting + 4 turns

    let ids: HashSet<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids.len(), messages.len());

    for pair in messages.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test(start_paused = true)]
async fn turns_alternate_user_then_bot() {
    let config = EngineConfig {
        greeting: String::new(),
        ..test_config()
    };
    let mut convo = Conversation::new(config);
    for input in ["What is malware?", "do I need a vpn?"] {
        complete_turn(&mut convo, input).await;
    }

    let messages = convo.messages().await;
    let senders: Vec<Sender> = messages.iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::User, Sender::Bot, Sender::User, Sender::Bot]);
}

#[tokio::test(start_paused = true)]
async fn engine_is_usable_for_a_new_turn_after_each_reply() {
    let mut convo = Conversation::new(test_config());
    complete_turn(&mut convo, "What is phishing?").await;
    assert!(!convo.is_awaiting_reply().await);

    let outcome = convo.submit("what is malware").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Accepted);
}

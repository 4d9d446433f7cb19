//! Rule-based FAQ responder.
//!
//! Keyword matching is a pure function of the normalised message; the two
//! live-data patterns additionally interpolate counts from the listings
//! table, fetched only when the pattern matches.

use std::sync::Arc;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{Error, ListingStatus};

/// Reply for an empty message.
const EMPTY_MESSAGE_REPLY: &str = "Please type a message.";

/// Reply when no pattern or FAQ tag matches.
const FALLBACK_REPLY: &str = "I can help with: registration, login, adoption, reporting pets, \
     and map location. Try asking: 'How to adopt?'";

/// One entry of the static FAQ table. Order matters: the first entry whose
/// any tag occurs as a substring of the message wins.
struct FaqEntry {
    tags: &'static [&'static str],
    answer: &'static str,
}

const FAQ_TABLE: &[FaqEntry] = &[
    FaqEntry {
        tags: &["register", "signup", "create account"],
        answer: "To adopt a pet, you need to register first. Go to the Register page, \
                 fill in your details, then log in.",
    },
    FaqEntry {
        tags: &["login", "sign in"],
        answer: "Go to the Login page and enter your email and password. After logging \
                 in, you can adopt pets.",
    },
    FaqEntry {
        tags: &["adopt", "adoption", "save pet"],
        answer: "Open a pet detail page and click 'Adopt Now'. Only logged-in users can \
                 adopt.",
    },
    FaqEntry {
        tags: &["report", "add pet", "new pet", "post"],
        answer: "Click 'Report a Street Pet' in the header and upload a photo, a \
                 location, and details.",
    },
    FaqEntry {
        tags: &["map", "location", "google maps"],
        answer: "Each pet post includes a map link so you can find the exact place.",
    },
];

/// First-match-wins scan of the static table. Expects a lowercased,
/// trimmed message.
fn match_faq(normalised: &str) -> Option<&'static str> {
    FAQ_TABLE
        .iter()
        .find(|entry| entry.tags.iter().any(|tag| normalised.contains(tag)))
        .map(|entry| entry.answer)
}

/// True when the message asks for the live AVAILABLE count: "available"
/// co-occurring with "pet" or "pets".
fn wants_available_count(normalised: &str) -> bool {
    normalised.contains("available")
        && (normalised.contains("pets") || normalised.contains("pet"))
}

/// True when the message asks for the live ADOPTED count.
fn wants_adopted_count(normalised: &str) -> bool {
    normalised.contains("adopted")
}

fn map_persistence_error(error: PetPersistenceError) -> Error {
    match error {
        PetPersistenceError::Connection { message } => Error::service_unavailable(message),
        PetPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Stateless chat responder over the listings store.
///
/// No session, no history, no learning: every reply is a function of the
/// single inbound message and the current listing counts.
#[derive(Clone)]
pub struct ChatService {
    pets: Arc<dyn PetRepository>,
}

impl ChatService {
    /// Create a new responder backed by the given repository.
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }

    /// Produce the reply for one free-text message.
    pub async fn reply(&self, message: &str) -> Result<String, Error> {
        let normalised = message.trim().to_lowercase();

        if normalised.is_empty() {
            return Ok(EMPTY_MESSAGE_REPLY.to_owned());
        }

        // Live-data patterns take precedence over the static table.
        if wants_available_count(&normalised) {
            let count = self
                .pets
                .count_by_status(ListingStatus::Available)
                .await
                .map_err(map_persistence_error)?;
            return Ok(format!("Right now, there are {count} pets available."));
        }

        if wants_adopted_count(&normalised) {
            let count = self
                .pets
                .count_by_status(ListingStatus::Adopted)
                .await
                .map_err(map_persistence_error)?;
            return Ok(format!("So far, {count} pets have been adopted."));
        }

        if let Some(answer) = match_faq(&normalised) {
            return Ok(answer.to_owned());
        }

        Ok(FALLBACK_REPLY.to_owned())
    }
}

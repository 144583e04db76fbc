use crate::taskmaster::store::StoreKey;

/// The member that invoked a command, as seen by the command handlers.
///
/// Carries just enough of the Discord context to address the member's task
/// list and to format replies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Requester {
    /// ID of the guild the command was invoked in
    pub(crate) guild_id: u64,
    /// Discord user's unique identifier
    pub(crate) user_id: u64,
    /// Discord username of the member
    pub(crate) user_name: String,
    /// Mention string for addressing the member in replies
    pub(crate) mention: String,
}

impl From<&Requester> for StoreKey {
    fn from(requester: &Requester) -> Self {
        StoreKey {
            guild_id: requester.guild_id,
            user_id: requester.user_id,
        }
    }
}

/// Builder for Requester instances.
///
/// This provides a fluent interface for constructing Requester objects,
/// making test code more readable and flexible.
#[derive(Debug, Default)]
#[cfg(test)]
pub struct RequesterBuilder {
    guild_id: u64,
    user_id: u64,
    user_name: String,
    mention: String,
}

#[cfg(test)]
impl RequesterBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the guild the command was invoked in.
    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Sets the Discord user ID.
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        // Default the mention to a standard Discord mention format if not explicitly set
        if self.mention.is_empty() {
            self.mention = format!("<@{}>", user_id);
        }
        self
    }

    /// Sets the username for this member.
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Sets the mention string for this member.
    pub fn mention(mut self, mention: impl Into<String>) -> Self {
        self.mention = mention.into();
        self
    }

    /// Builds a Requester instance with the configured values.
    pub fn build(self) -> Requester {
        Requester {
            guild_id: self.guild_id,
            user_id: self.user_id,
            user_name: self.user_name,
            mention: self.mention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_is_derived_from_requester() {
        // Arrange
        let requester = RequesterBuilder::new()
            .guild_id(424242)
            .user_id(171717)
            .user_name("TestUser")
            .build();

        // Act
        let key = StoreKey::from(&requester);

        // Assert
        assert_eq!(key.guild_id, 424242);
        assert_eq!(key.user_id, 171717);
    }

    #[test]
    fn test_builder_defaults_mention_from_user_id() {
        // Act
        let requester = RequesterBuilder::new().user_id(171717).build();

        // Assert
        assert_eq!(requester.mention, "<@171717>");
    }
}

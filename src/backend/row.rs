use thiserror::Error;

/// Byte size of the `id` column.
pub const ID_SIZE: usize = std::mem::size_of::<u32>();
/// Maximum byte capacity of the `username` column.
pub const USERNAME_SIZE: usize = 32;
/// Maximum byte capacity of the `email` column.
pub const EMAIL_SIZE: usize = 255;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Total serialized size of a [`Row`]: 4 (id) + 32 (username) + 255 (email).
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

#[derive(Error, Debug)]
pub enum RowError {
    #[error("username exceeds {USERNAME_SIZE} bytes")]
    UsernameTooLong,
    #[error("email exceeds {EMAIL_SIZE} bytes")]
    EmailTooLong,
}

/// The sole logical record this engine stores.
///
/// `username` and `email` are fixed-capacity byte buffers; callers populate them from a
/// validated `&str` and the remainder is zero-padded on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self, RowError> {
        if username.len() > USERNAME_SIZE {
            return Err(RowError::UsernameTooLong);
        }
        if email.len() > EMAIL_SIZE {
            return Err(RowError::EmailTooLong);
        }

        let mut row = Row {
            id,
            username: [0; USERNAME_SIZE],
            email: [0; EMAIL_SIZE],
        };
        row.username[..username.len()].copy_from_slice(username.as_bytes());
        row.email[..email.len()].copy_from_slice(email.as_bytes());
        Ok(row)
    }

    pub fn username(&self) -> &str {
        str_from_padded(&self.username)
    }

    pub fn email(&self) -> &str {
        str_from_padded(&self.email)
    }

    /// Writes exactly [`ROW_SIZE`] bytes to `dst` at the schema's fixed offsets.
    pub fn serialize(&self, dst: &mut [u8; ROW_SIZE]) {
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_ne_bytes());
        dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE].copy_from_slice(&self.username);
        dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE].copy_from_slice(&self.email);
    }

    /// Inverts [`Row::serialize`]. Total over any [`ROW_SIZE`]-byte region; preserves whatever
    /// bytes were previously written, performing no validation of string termination.
    pub fn deserialize(src: &[u8; ROW_SIZE]) -> Self {
        let id = u32::from_ne_bytes(src[ID_OFFSET..ID_OFFSET + ID_SIZE].try_into().unwrap());
        let mut username = [0u8; USERNAME_SIZE];
        username.copy_from_slice(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let mut email = [0u8; EMAIL_SIZE];
        email.copy_from_slice(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
        Row {
            id,
            username,
            email,
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

fn str_from_padded(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_deserialize_round_trip() {
        let row = Row::new(7, "cstack", "foo@bar.com").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);
        let back = Row::deserialize(&buf);
        assert_eq!(back, row);
        assert_eq!(back.username(), "cstack");
        assert_eq!(back.email(), "foo@bar.com");
    }

    #[test]
    fn zero_pads_unused_capacity() {
        let row = Row::new(1, "a", "b").unwrap();
        let mut buf = [0xffu8; ROW_SIZE];
        row.serialize(&mut buf);
        assert_eq!(
            &buf[USERNAME_OFFSET + 1..USERNAME_OFFSET + USERNAME_SIZE],
            &[0u8; USERNAME_SIZE - 1]
        );
        assert_eq!(
            &buf[EMAIL_OFFSET + 1..EMAIL_OFFSET + EMAIL_SIZE],
            &[0u8; EMAIL_SIZE - 1]
        );
    }

    #[test]
    fn rejects_oversized_username() {
        let too_long = "a".repeat(USERNAME_SIZE + 1);
        assert!(matches!(
            Row::new(1, &too_long, "x"),
            Err(RowError::UsernameTooLong)
        ));
    }

    #[test]
    fn rejects_oversized_email() {
        let too_long = "a".repeat(EMAIL_SIZE + 1);
        assert!(matches!(
            Row::new(1, "x", &too_long),
            Err(RowError::EmailTooLong)
        ));
    }

    #[test]
    fn row_size_matches_schema() {
        assert_eq!(ROW_SIZE, 291);
    }
}

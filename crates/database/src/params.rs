use sqlx::encode::Encode;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::{Arguments, Type};

/// An ordered list of bind parameters for `$1`, `$2`, ... placeholders.
///
/// Values are encoded as they are pushed. An encoding failure is kept and
/// reported when the statement runs, the same way `sqlx::Query::bind` does.
#[derive(Default)]
pub struct Params {
    args: PgArguments,
    len: usize,
    error: Option<BoxDynError>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for the next placeholder.
    pub fn push<T>(mut self, value: T) -> Self
    where
        T: Encode<'static, Postgres> + Type<Postgres> + 'static,
    {
        self.add(value);
        self
    }

    /// Appends a value for the next placeholder, in place.
    pub fn add<T>(&mut self, value: T) -> &mut Self
    where
        T: Encode<'static, Postgres> + Type<Postgres> + 'static,
    {
        if self.error.is_none() {
            if let Err(e) = self.args.add(value) {
                self.error = Some(e);
            }
        }
        self.len += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn into_arguments(self) -> Result<PgArguments, sqlx::Error> {
        match self.error {
            Some(e) => Err(sqlx::Error::Encode(e)),
            None => Ok(self.args),
        }
    }
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("len", &self.len)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

impl<T> FromIterator<T> for Params
where
    T: Encode<'static, Postgres> + Type<Postgres> + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut params = Params::new();
        for value in iter {
            params.add(value);
        }
        params
    }
}

/// Builds [`Params`] from a list of values of any encodable type.
///
/// ```ignore
/// db.exec("INSERT INTO t (id, name) VALUES ($1, $2)", params![7_i64, "seven"]).await?;
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Params::new()$(.push($value))+
    };
}

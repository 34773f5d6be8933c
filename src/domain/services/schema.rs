use crate::domain::entities::header::HeaderSpec;
use crate::domain::entities::row::NormalizedRow;

/// A typed row generated from a deployment's header configuration.
pub trait SchemaRecord: Sized {
    /// Source header names in declaration order.
    const SOURCE_HEADERS: &'static [&'static str];
    /// Display names, parallel to `SOURCE_HEADERS`.
    const DISPLAY_HEADERS: &'static [&'static str];

    fn header_spec() -> HeaderSpec {
        HeaderSpec::new(
            Self::SOURCE_HEADERS.iter().copied(),
            Self::SOURCE_HEADERS
                .iter()
                .copied()
                .zip(Self::DISPLAY_HEADERS.iter().copied()),
        )
    }

    fn from_row(row: &NormalizedRow) -> Self;
}

/// Declares a record type together with the header configuration it is read
/// through:
///
/// ```ignore
/// header_schema! {
///     pub struct Carrier {
///         dot: "usdot_number" => "DOT",
///     }
/// }
/// ```
macro_rules! header_schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $record:ident {
            $( $field:ident : $source:literal => $display:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $record {
            pub id: u64,
            $( pub $field: Option<$crate::domain::entities::cell::CellValue>, )*
        }

        impl $crate::domain::services::schema::SchemaRecord for $record {
            const SOURCE_HEADERS: &'static [&'static str] = &[$($source),*];
            const DISPLAY_HEADERS: &'static [&'static str] = &[$($display),*];

            fn from_row(row: &$crate::domain::entities::row::NormalizedRow) -> Self {
                Self {
                    id: row.id(),
                    $( $field: row.get($display).cloned(), )*
                }
            }
        }
    };
}

pub(crate) use header_schema;

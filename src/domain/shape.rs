use crate::domain::model::Category;
use crate::utils::error::{MealError, Result};
use std::fmt;
use std::str::FromStr;

const SINGLE_PREFIX: &str = "single_";
const ROLE_SEPARATOR: char = '+';

/// 組合形狀：每個角色對應一個分類，依序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationShape {
    Single(Category),
    Pairing(Category, Category),
    Set(Category, Category, Category),
}

impl CombinationShape {
    /// 由分類角色建立形狀，只接受 1 到 3 個角色
    pub fn from_roles(roles: &[Category]) -> Result<Self> {
        match roles {
            [a] => Ok(Self::Single(*a)),
            [a, b] => Ok(Self::Pairing(*a, *b)),
            [a, b, c] => Ok(Self::Set(*a, *b, *c)),
            _ => Err(MealError::InvalidShape {
                shape: roles
                    .iter()
                    .map(Category::as_str)
                    .collect::<Vec<_>>()
                    .join("+"),
                reason: format!("expected 1 to 3 category roles, got {}", roles.len()),
            }),
        }
    }

    pub fn roles(&self) -> Vec<Category> {
        match *self {
            Self::Single(a) => vec![a],
            Self::Pairing(a, b) => vec![a, b],
            Self::Set(a, b, c) => vec![a, b, c],
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pairing(..) => 2,
            Self::Set(..) => 3,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Single(a) => format!("{}{}", SINGLE_PREFIX, a),
            _ => self
                .roles()
                .iter()
                .map(Category::as_str)
                .collect::<Vec<_>>()
                .join("+"),
        }
    }

    /// 介面提供的常用形狀
    pub fn presets() -> Vec<CombinationShape> {
        use Category::*;
        vec![
            Self::Single(Main),
            Self::Single(Snack),
            Self::Pairing(Main, Side),
            Self::Pairing(Main, Dessert),
            Self::Pairing(Main, Drink),
            Self::Pairing(Snack, Drink),
            Self::Set(Main, Side, Drink),
            Self::Set(Main, Side, Dessert),
            Self::Set(Appetizer, Main, Dessert),
        ]
    }
}

impl fmt::Display for CombinationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for CombinationShape {
    type Err = MealError;

    /// 解析 `single_<Category>`、`<A>+<B>`、`<A>+<B>+<C>`
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let invalid = |reason: String| MealError::InvalidShape {
            shape: s.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("shape is empty".to_string()));
        }

        let prefix_len = SINGLE_PREFIX.len();
        let has_single_prefix = raw.len() >= prefix_len
            && raw.is_char_boundary(prefix_len)
            && raw[..prefix_len].eq_ignore_ascii_case(SINGLE_PREFIX);

        if has_single_prefix {
            let rest = &raw[prefix_len..];
            if rest.contains(ROLE_SEPARATOR) {
                return Err(invalid(
                    "a single_ shape takes exactly one category".to_string(),
                ));
            }
            let category = rest
                .parse::<Category>()
                .map_err(|e| invalid(e.to_string()))?;
            return Ok(Self::Single(category));
        }

        if !raw.contains(ROLE_SEPARATOR) {
            return Err(invalid(format!(
                "use '{}<Category>' or join categories with '{}'",
                SINGLE_PREFIX, ROLE_SEPARATOR
            )));
        }

        let roles = raw
            .split(ROLE_SEPARATOR)
            .map(|part| part.parse::<Category>().map_err(|e| invalid(e.to_string())))
            .collect::<Result<Vec<_>>>()?;

        match roles.len() {
            2 | 3 => Self::from_roles(&roles),
            n => Err(invalid(format!(
                "expected 2 or 3 categories joined by '{}', got {}",
                ROLE_SEPARATOR, n
            ))),
        }
    }
}

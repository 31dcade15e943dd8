/// Which entries a permission change applies to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ApplyScope {
    /// Files and directories.
    #[default]
    All,
    /// Entries not listed as directories.
    FilesOnly,
    /// Entries listed as directories, links to directories included.
    DirsOnly,
}

impl ApplyScope {
    /// Returns `true` if an entry listed with `is_dir` is in scope.
    pub const fn includes(self, is_dir: bool) -> bool {
        match self {
            Self::All => true,
            Self::FilesOnly => !is_dir,
            Self::DirsOnly => is_dir,
        }
    }
}

/// Computes new permissions for entries of a remote listing.
pub trait PermissionConverter {
    /// Parses the permissions shown in a listing into mode bits.
    ///
    /// Returns `None` when the text is not understood.
    fn convert(&self, existing: &str) -> Option<u32>;

    /// Renders the permissions to send for an entry whose current mode is
    /// `existing`, or unknown when `None`. An empty string skips the entry.
    fn new_permissions(&self, existing: Option<u32>, is_dir: bool) -> String;

    /// Entries the change applies to.
    fn apply_scope(&self) -> ApplyScope;
}

/// Error produced when a mode change specification cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid mode change '{clause}': {reason}")]
pub struct ModeChangeError {
    clause: String,
    reason: &'static str,
}

impl ModeChangeError {
    fn new(clause: &str, reason: &'static str) -> Self {
        Self {
            clause: clause.to_owned(),
            reason,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Op {
    Add,
    Remove,
    Assign,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Clause {
    Numeric(u32),
    Symbolic {
        who: u32,
        op: Op,
        bits: u32,
        conditional_exec: bool,
    },
}

const USER: u32 = 0o700;
const GROUP: u32 = 0o070;
const OTHER: u32 = 0o007;
const READ: u32 = 0o444;
const WRITE: u32 = 0o222;
const EXEC: u32 = 0o111;

/// `chmod`-style permission change: comma-separated numeric (`644`) or
/// symbolic (`u+rw`, `go-w`, `a=rX`) clauses applied in order.
///
/// # Examples
///
/// ```
/// use remote::{ApplyScope, ModeChange, PermissionConverter};
///
/// let change = ModeChange::parse("go-w,a+X", ApplyScope::All).unwrap();
/// let mode = change.convert("rwxrwxr--").unwrap();
/// assert_eq!(change.new_permissions(Some(mode), false), "755");
///
/// // Absolute changes do not need the current mode.
/// let change = ModeChange::parse("640", ApplyScope::All).unwrap();
/// assert_eq!(change.new_permissions(None, false), "640");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModeChange {
    clauses: Vec<Clause>,
    scope: ApplyScope,
}

impl ModeChange {
    /// Parses `spec`.
    pub fn parse(spec: &str, scope: ApplyScope) -> Result<Self, ModeChangeError> {
        let clauses = spec
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(parse_clause)
            .collect::<Result<Vec<_>, _>>()?;
        if clauses.is_empty() {
            return Err(ModeChangeError::new(spec, "no clauses"));
        }
        Ok(Self { clauses, scope })
    }

    /// Applies the clauses to `mode`.
    pub fn apply(&self, mode: u32, is_dir: bool) -> u32 {
        self.clauses
            .iter()
            .fold(mode & 0o777, |mode, clause| clause.apply(mode, is_dir))
    }

    /// Applies the clauses to a mode that may be unknown.
    ///
    /// Returns `None` while the result still depends on bits nobody could
    /// read; a later absolute clause makes it known again.
    pub fn apply_to(&self, mode: Option<u32>, is_dir: bool) -> Option<u32> {
        self.clauses
            .iter()
            .fold(mode.map(|mode| mode & 0o777), |mode, clause| match mode {
                Some(mode) => Some(clause.apply(mode, is_dir)),
                None => clause
                    .replaces_mode(is_dir)
                    .then(|| clause.apply(0, is_dir)),
            })
    }
}

impl Clause {
    fn apply(self, mode: u32, is_dir: bool) -> u32 {
        match self {
            Self::Numeric(value) => value,
            Self::Symbolic {
                who,
                op,
                bits,
                conditional_exec,
            } => {
                let mut bits = bits;
                if conditional_exec && (is_dir || mode & EXEC != 0) {
                    bits |= EXEC;
                }
                let bits = bits & who;
                match op {
                    Op::Add => mode | bits,
                    Op::Remove => mode & !bits,
                    Op::Assign => (mode & !who) | bits,
                }
            }
        }
    }

    /// `true` if the result does not depend on the mode it is applied to.
    fn replaces_mode(self, is_dir: bool) -> bool {
        match self {
            Self::Numeric(_) => true,
            Self::Symbolic {
                who,
                op,
                conditional_exec,
                ..
            } => op == Op::Assign && who == USER | GROUP | OTHER && (is_dir || !conditional_exec),
        }
    }
}

impl PermissionConverter for ModeChange {
    fn convert(&self, existing: &str) -> Option<u32> {
        parse_listed_permissions(existing)
    }

    fn new_permissions(&self, existing: Option<u32>, is_dir: bool) -> String {
        self.apply_to(existing, is_dir)
            .map(|mode| format!("{mode:03o}"))
            .unwrap_or_default()
    }

    fn apply_scope(&self) -> ApplyScope {
        self.scope
    }
}

fn parse_clause(text: &str) -> Result<Clause, ModeChangeError> {
    if text.chars().all(|c| c.is_ascii_digit()) {
        if !(3..=4).contains(&text.len()) {
            return Err(ModeChangeError::new(text, "expected 3 or 4 octal digits"));
        }
        return u32::from_str_radix(text, 8)
            .map(|value| Clause::Numeric(value & 0o777))
            .map_err(|_| ModeChangeError::new(text, "not an octal number"));
    }

    let mut chars = text.chars().peekable();
    let mut who = 0;
    while let Some(&c) = chars.peek() {
        who |= match c {
            'u' => USER,
            'g' => GROUP,
            'o' => OTHER,
            'a' => USER | GROUP | OTHER,
            _ => break,
        };
        chars.next();
    }
    if who == 0 {
        who = USER | GROUP | OTHER;
    }

    let op = match chars.next() {
        Some('+') => Op::Add,
        Some('-') => Op::Remove,
        Some('=') => Op::Assign,
        _ => return Err(ModeChangeError::new(text, "missing operator")),
    };

    let mut bits = 0;
    let mut conditional_exec = false;
    for c in chars {
        match c {
            'r' => bits |= READ,
            'w' => bits |= WRITE,
            'x' => bits |= EXEC,
            'X' => conditional_exec = true,
            _ => return Err(ModeChangeError::new(text, "unknown permission")),
        }
    }
    if bits == 0 && !conditional_exec && op != Op::Assign {
        return Err(ModeChangeError::new(text, "no permissions given"));
    }

    Ok(Clause::Symbolic {
        who,
        op,
        bits,
        conditional_exec,
    })
}

/// Parses listing permission text: `rwxr-xr-x`, the same with a leading
/// type character (`drwxr-xr-x`), or 3-4 octal digits.
pub fn parse_listed_permissions(text: &str) -> Option<u32> {
    let text = text.trim();
    if !text.is_empty() && text.len() <= 4 && text.chars().all(|c| c.is_digit(8)) {
        return u32::from_str_radix(text, 8).ok().map(|mode| mode & 0o777);
    }

    let symbols: Vec<char> = text.chars().collect();
    let symbols = match symbols.len() {
        9 => &symbols[..],
        10 => &symbols[1..],
        _ => return None,
    };

    let mut mode = 0;
    for (index, triple) in symbols.chunks(3).enumerate() {
        let shift = 6 - 3 * index;
        let mut bits = 0;
        match triple[0] {
            'r' => bits |= 0b100,
            '-' => {}
            _ => return None,
        }
        match triple[1] {
            'w' => bits |= 0b010,
            '-' => {}
            _ => return None,
        }
        match triple[2] {
            'x' | 's' | 't' => bits |= 0b001,
            '-' | 'S' | 'T' => {}
            _ => return None,
        }
        mode |= bits << shift;
    }
    Some(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_selection() {
        assert!(ApplyScope::All.includes(true));
        assert!(ApplyScope::All.includes(false));
        assert!(ApplyScope::FilesOnly.includes(false));
        assert!(!ApplyScope::FilesOnly.includes(true));
        assert!(ApplyScope::DirsOnly.includes(true));
        assert!(!ApplyScope::DirsOnly.includes(false));
    }

    #[test]
    fn listed_permissions() {
        assert_eq!(parse_listed_permissions("rwxr-xr-x"), Some(0o755));
        assert_eq!(parse_listed_permissions("drw-r-----"), Some(0o640));
        assert_eq!(parse_listed_permissions("rwsr-xr-T"), Some(0o754));
        assert_eq!(parse_listed_permissions("0644"), Some(0o644));
        assert_eq!(parse_listed_permissions("garbage"), None);
        assert_eq!(parse_listed_permissions(""), None);
    }

    #[test]
    fn numeric_clause_replaces_mode() {
        let change = ModeChange::parse("640", ApplyScope::All).expect("parse");
        assert_eq!(change.apply(0o777, false), 0o640);
    }

    #[test]
    fn symbolic_clauses_apply_in_order() {
        let change = ModeChange::parse("u=rw,go-w", ApplyScope::All).expect("parse");
        assert_eq!(change.apply(0o777, false), 0o655);
        let change = ModeChange::parse("o+r", ApplyScope::All).expect("parse");
        assert_eq!(change.apply(0o600, false), 0o604);
    }

    #[test]
    fn conditional_execute() {
        let change = ModeChange::parse("a+X", ApplyScope::All).expect("parse");
        assert_eq!(change.apply(0o644, true), 0o755);
        assert_eq!(change.apply(0o644, false), 0o644);
        assert_eq!(change.apply(0o744, false), 0o755);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(ModeChange::parse("", ApplyScope::All).is_err());
        assert!(ModeChange::parse("u*r", ApplyScope::All).is_err());
        assert!(ModeChange::parse("u+q", ApplyScope::All).is_err());
        assert!(ModeChange::parse("12", ApplyScope::All).is_err());
        let error = ModeChange::parse("g+", ApplyScope::All).expect_err("empty permissions");
        assert_eq!(
            error.to_string(),
            "invalid mode change 'g+': no permissions given"
        );
    }

    #[test]
    fn renders_octal() {
        let change = ModeChange::parse("go=", ApplyScope::DirsOnly).expect("parse");
        assert_eq!(change.new_permissions(Some(0o755), true), "700");
        assert_eq!(change.apply_scope(), ApplyScope::DirsOnly);
    }

    #[test]
    fn unknown_mode_needs_an_absolute_change() {
        let numeric = ModeChange::parse("644", ApplyScope::All).expect("parse");
        assert_eq!(numeric.new_permissions(None, false), "644");

        let assign = ModeChange::parse("a=rX", ApplyScope::All).expect("parse");
        assert_eq!(assign.new_permissions(None, true), "555");
        assert_eq!(assign.new_permissions(None, false), "");

        let relative = ModeChange::parse("go-w", ApplyScope::All).expect("parse");
        assert_eq!(relative.new_permissions(None, false), "");
        assert_eq!(relative.apply_to(None, false), None);

        let partial = ModeChange::parse("u=rw", ApplyScope::All).expect("parse");
        assert_eq!(partial.new_permissions(None, false), "");

        let recovered = ModeChange::parse("o+w,750,g-x", ApplyScope::All).expect("parse");
        assert_eq!(recovered.apply_to(None, false), Some(0o740));
    }
}

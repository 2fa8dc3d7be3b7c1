/*!

# esregex - an EcmaScript regular expression engine

This crate provides a regular expression engine which implements EcmaScript (aka JavaScript) regular expression syntax and matching semantics, including the `u` and `v` flags.

# Example: test if a string contains a match

```rust
use esregex::Regex;
let re = Regex::new(r"\d{4}").unwrap();
let matched = re.find("2020-20-05").is_some();
assert!(matched);
```

# Example: iterating over matches

Here we use a backreference to find doubled characters:

```rust
use esregex::Regex;
let re = Regex::new(r"(\w)\1").unwrap();
let text = "Frankly, Miss Piggy, I don't give a hoot!";
let doubled: Vec<&str> = re.find_iter(text).map(|m| &text[m.range()]).collect();
assert_eq!(doubled, vec!["ss", "gg", "oo"]);
```

# Example: using capture groups

Capture groups are available in the `Match` object produced by a successful match.
Over a `&str`, a capture group is a range of byte indexes into the original string.

```rust
use esregex::Regex;
let re = Regex::new(r"(?<year>\d{4})-(?<month>\d{2})").unwrap();
let text = "Today is 2024-05";
let m = re.find(text).unwrap();
assert_eq!(&text[m.group(1).unwrap()], "2024");
assert_eq!(&text[m.named_group("month").unwrap()], "05");
```

# UTF-16

JavaScript strings are sequences of UTF-16 code units, which may hold unpaired surrogates.
The `_utf16` entry points match such text directly and report code unit offsets.
Outside of the `u` and `v` modes every code unit is a character, as in JavaScript:

```rust
use esregex::Regex;
let text: Vec<u16> = "\u{1F600}".encode_utf16().collect();
assert!(Regex::new("^.$").unwrap().find_utf16(&text).is_none());
assert!(Regex::with_flags("^.$", "u").unwrap().find_utf16(&text).is_some());
```

# Unicode sets

The `v` flag enables set operations and strings in classes:

```rust
use esregex::Regex;
let re = Regex::with_flags(r"[\w--[aeiou]]+", "v").unwrap();
assert_eq!(re.find("bcdfg1").unwrap().range(), 0..6);
let re = Regex::with_flags(r"^[\q{abc|d}]$", "v").unwrap();
assert!(re.find("abc").is_some());
```

# Unicode remarks

Case-insensitive matching uses simple case folding in the `u` and `v` modes, and the legacy uppercase mapping otherwise:

```rust
use esregex::Regex;
let re = Regex::with_flags("\u{00B5}", "iu").unwrap();
assert!(re.find("\u{03BC}").is_some());
```

esregex does NOT perform normalization. For example, e-with-acute-accent can be precomposed or decomposed, and these are treated as not equivalent:

```rust
use esregex::Regex;
let re = Regex::new("\u{00E9}").unwrap();
assert!(re.find("\u{0065}\u{0301}").is_none());
```

This agrees with JavaScript semantics. Perform any required normalization before regex matching.

# Bounded matching

Backtracking may take exponential time. A match can be bounded with a step budget, which is consulted before every instruction:

```rust
use esregex::{Regex, StepLimit};
let re = Regex::new("(a*)*b").unwrap();
let text: Vec<u16> = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".encode_utf16().collect();
let outcome = re.exec_with_budget(&text, 0, false, &mut StepLimit::new(10_000));
assert!(outcome.is_aborted());
```

# Architecture

esregex has a parser, intermediate representation, optimizer which acts on the IR, bytecode emitter, and a "classical backtracking" interpreter which uses an explicit backtracking stack, similar to JS implementations.
Lookarounds run in the same interpreter loop, so matching does not recurse on the native stack.

*/

#![warn(clippy::all)]
#![allow(clippy::upper_case_acronyms, clippy::match_like_matches_macro)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

pub use crate::api::*;
pub use crate::config::{LanguageVersion, Options};
pub use crate::error::{Error, ErrorKind};
pub use crate::exec::{Aborted, MatchOutcome, StepBudget, StepLimit, Unbounded};
pub use crate::types::GroupName;
pub use crate::unicodedata::{BuiltinUnicodeData, ScriptCode, UnicodeData};

#[macro_use]
mod util;

mod api;
mod charclasses;
mod charset;
mod classicalbacktrack;
mod codepointset;
mod config;
mod cursor;
mod emit;
mod emojitables;
mod error;
mod exec;
mod folds;
mod indexing;
mod insn;
mod ir;
mod matchers;
mod optimizer;
mod parse;
mod scm;
mod startpredicate;
mod types;
mod unicode;
mod unicodedata;

// Support for inspecting the stages of compilation.
#[doc(hidden)]
pub mod backends {
    use crate::config::Options;
    use crate::error::Error;
    pub use crate::ir::Regex as IrRegex;
    pub use crate::optimizer::optimize;

    /// Parse a pattern given as UTF-16 code units into the IR.
    pub fn try_parse(pattern: &[u16], options: &Options) -> Result<IrRegex, Error> {
        let elements = crate::util::decode_elements(pattern, options.flags.either_unicode());
        crate::parse::try_parse(&elements, options)
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::diagnostics::RawDiagnostic;

peg::parser! {
    /// Grammar for single toolchain diagnostic lines (GCC family, javac).
    pub grammar parser() for str {
        /// matches any sequence of 1 or more numbers
        rule number() -> u32
            = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

        /// matches spaces and tabs
        rule whitespace() = quiet!{[' ' | '\t']+}

        /// matches the path segment: everything up to the first colon
        // TODO: support drive letters (e.g., `C:`) by allowing ':' once we
        // have windows toolchain fixtures to test against.
        rule path() -> String
            = p:$([^ ':' | '\n']+) { p.to_string() }

        /// matches an optional `:<column>` segment (javac omits the column)
        rule column() -> u32
            = ":" n:number() { n }

        /// matches the severity word, returns true if error
        rule severity() -> bool
            = "fatal error" { true }
            / "error" { true }
            / "warning" { false }

        /// matches the remainder of the line, placed where the message is
        rule message() -> String
            = m:$([_]*) { m.trim().to_string() }

        /// parses one `<path>:<line>[:<column>]: <severity>: <message>` line
        /// and returns a `RawDiagnostic`
        pub rule parse_diag() -> RawDiagnostic
            = p:path() ":" l:number() c:column()? ":" whitespace()? e:severity() ":" whitespace()? m:message()
            {
                RawDiagnostic {
                    path: p,
                    line: l,
                    column: c,
                    is_error: e,
                    message: m,
                }
            }
    }
}

//! Comment extraction for the comment syntaxes the header checker understands.
//!
//! Scanners skip string literals so that comment markers inside strings are not
//! reported. Literals in `'`/`"` quotes end at the closing quote or the end of the
//! line, which keeps Rust lifetimes and shell apostrophes from swallowing a file.

use super::HeaderError;

/// Comment syntax families, selected by MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `// line` and `/* block */` (C, C++, Go, Java, JavaScript).
    CLike,
    /// `# line` (Python, shell, Ruby, YAML, TOML, make, Docker, CMake).
    Hash,
    /// `<!-- block -->` (HTML, XML).
    Markup,
}

impl CommentSyntax {
    pub fn for_mime(mime: &str) -> Result<Self, HeaderError> {
        match mime {
            "text/x-c" | "text/x-c++" | "text/x-go" | "text/x-java" | "text/x-java-source"
            | "application/javascript" | "text/javascript" => Ok(Self::CLike),
            "text/x-python" | "text/x-script.python" | "text/x-shellscript" | "text/x-sh"
            | "text/x-ruby" | "text/x-yaml" | "text/x-toml" | "text/x-makefile"
            | "text/x-dockerfile" | "text/x-cmake" => Ok(Self::Hash),
            "text/html" | "text/xml" | "application/xml" => Ok(Self::Markup),
            other => Err(HeaderError::UnsupportedMime(other.to_string())),
        }
    }
}

/// A single comment's text without the delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// Extract every comment from `source`, in source order.
pub fn extract_comments(source: &str, syntax: CommentSyntax) -> Result<Vec<Comment>, HeaderError> {
    let chars: Vec<char> = source.chars().collect();
    let mut scanner = Scanner {
        chars: &chars,
        pos: 0,
        line: 1,
        comments: Vec::new(),
    };
    match syntax {
        CommentSyntax::CLike => scanner.scan_c_like()?,
        CommentSyntax::Hash => scanner.scan_hash(),
        CommentSyntax::Markup => scanner.scan_markup()?,
    }
    Ok(scanner.comments)
}

struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
    line: usize,
    comments: Vec<Comment>,
}

impl Scanner<'_> {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pat: &str) -> bool {
        pat.chars().enumerate().all(|(k, c)| self.peek(k) == Some(c))
    }

    /// Move to `end`, counting the newlines passed over.
    fn advance_to(&mut self, end: usize) {
        let end = end.min(self.chars.len());
        self.line += self.chars[self.pos..end].iter().filter(|&&c| c == '\n').count();
        self.pos = end;
    }

    fn find(&self, from: usize, pat: &str) -> Option<usize> {
        let pat: Vec<char> = pat.chars().collect();
        (from..self.chars.len())
            .find(|&i| self.chars[i..].starts_with(&pat))
    }

    fn line_end(&self, from: usize) -> usize {
        self.chars[from..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |p| from + p)
    }

    fn push(&mut self, start: usize, end: usize) {
        self.comments.push(Comment {
            text: self.chars[start..end].iter().collect(),
        });
    }

    /// End of a quoted literal opened at `self.pos`: just past the closing quote,
    /// or at the newline that cuts it short.
    fn quoted_end(&self, quote: char) -> usize {
        let mut j = self.pos + 1;
        while let Some(&c) = self.chars.get(j) {
            match c {
                '\\' => j += 2,
                '\n' => return j,
                c if c == quote => return j + 1,
                _ => j += 1,
            }
        }
        self.chars.len()
    }

    fn scan_c_like(&mut self) -> Result<(), HeaderError> {
        while let Some(c) = self.peek(0) {
            let end = match c {
                '/' if self.peek(1) == Some('/') => {
                    let end = self.line_end(self.pos + 2);
                    self.push(self.pos + 2, end);
                    end
                }
                '/' if self.peek(1) == Some('*') => {
                    let close = self
                        .find(self.pos + 2, "*/")
                        .ok_or(HeaderError::UnterminatedComment(self.line))?;
                    self.push(self.pos + 2, close);
                    close + 2
                }
                '"' | '\'' => self.quoted_end(c),
                '`' => self.find(self.pos + 1, "`").map_or(self.chars.len(), |p| p + 1),
                _ => self.pos + 1,
            };
            self.advance_to(end);
        }
        Ok(())
    }

    fn scan_hash(&mut self) {
        while let Some(c) = self.peek(0) {
            let end = match c {
                '#' if !self.is_shell_expansion() => {
                    let end = self.line_end(self.pos + 1);
                    self.push(self.pos + 1, end);
                    end
                }
                '"' | '\'' if self.starts_with(&c.to_string().repeat(3)) => {
                    let delim = c.to_string().repeat(3);
                    self.find(self.pos + 3, &delim)
                        .map_or(self.chars.len(), |p| p + 3)
                }
                '"' | '\'' => self.quoted_end(c),
                _ => self.pos + 1,
            };
            self.advance_to(end);
        }
    }

    /// `$#` and `${#var}` are shell expansions, not comments.
    fn is_shell_expansion(&self) -> bool {
        self.pos > 0 && matches!(self.chars[self.pos - 1], '$' | '{')
    }

    fn scan_markup(&mut self) -> Result<(), HeaderError> {
        while self.pos < self.chars.len() {
            let Some(open) = self.find(self.pos, "<!--") else {
                break;
            };
            self.advance_to(open);
            let close = self
                .find(open + 4, "-->")
                .ok_or(HeaderError::UnterminatedComment(self.line))?;
            self.push(open + 4, close);
            self.advance_to(close + 3);
        }
        Ok(())
    }
}

//! The fixed token grammar of mask strings.

/// A placeholder recognized inside a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `d`
    Day,
    /// `dd`
    DayPadded,
    /// `ddd`
    WeekdayShort,
    /// `dddd`
    WeekdayLong,
    /// `m`
    Month,
    /// `mm`
    MonthPadded,
    /// `mmm`
    MonthShort,
    /// `mmmm`
    MonthLong,
    /// `yy`
    Year2,
    /// `yyyy`
    Year4,
    /// `h`
    Hour12,
    /// `hh`
    Hour12Padded,
    /// `H`
    Hour24,
    /// `HH`
    Hour24Padded,
    /// `M`
    Minute,
    /// `MM`
    MinutePadded,
    /// `s`
    Second,
    /// `ss`
    SecondPadded,
    /// `l`: milliseconds, three digits.
    Millis,
    /// `L`: milliseconds rounded to hundredths of a second, two digits.
    Hundredths,
    /// `t`
    MeridiemShortLower,
    /// `tt`
    MeridiemLongLower,
    /// `T`
    MeridiemShortUpper,
    /// `TT`
    MeridiemLongUpper,
    /// `o`: `±HHMM`
    Offset,
    /// `S`: `st`, `nd`, `rd` or `th`
    Ordinal,
    /// `Z`
    ZoneName,
    /// `W`
    IsoWeek,
    /// `N`
    IsoWeekday,
}

impl Token {
    /// The mask text that produces this token.
    pub fn symbol(self) -> &'static str {
        match self {
            Token::Day => "d",
            Token::DayPadded => "dd",
            Token::WeekdayShort => "ddd",
            Token::WeekdayLong => "dddd",
            Token::Month => "m",
            Token::MonthPadded => "mm",
            Token::MonthShort => "mmm",
            Token::MonthLong => "mmmm",
            Token::Year2 => "yy",
            Token::Year4 => "yyyy",
            Token::Hour12 => "h",
            Token::Hour12Padded => "hh",
            Token::Hour24 => "H",
            Token::Hour24Padded => "HH",
            Token::Minute => "M",
            Token::MinutePadded => "MM",
            Token::Second => "s",
            Token::SecondPadded => "ss",
            Token::Millis => "l",
            Token::Hundredths => "L",
            Token::MeridiemShortLower => "t",
            Token::MeridiemLongLower => "tt",
            Token::MeridiemShortUpper => "T",
            Token::MeridiemLongUpper => "TT",
            Token::Offset => "o",
            Token::Ordinal => "S",
            Token::ZoneName => "Z",
            Token::IsoWeek => "W",
            Token::IsoWeekday => "N",
        }
    }
}

/// One compiled element of a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Literal(String),
    Token(Token),
}

/// Splits mask text into literal runs and tokens.
///
/// Letter runs are consumed greedily with the longest alternative first, so
/// `ddddd` is `dddd` followed by `d` and `yyy` is `yy` followed by a literal
/// `y`. Quoted sections lose their quotes; an unterminated quote is literal.
pub(crate) struct Scanner<'m> {
    rest: &'m str,
    literal: String,
    pieces: Vec<Piece>,
}

impl<'m> Scanner<'m> {
    pub(crate) fn new(mask: &'m str) -> Self {
        Scanner {
            rest: mask,
            literal: String::new(),
            pieces: Vec::new(),
        }
    }

    pub(crate) fn scan(mut self) -> Vec<Piece> {
        while let Some(c) = self.rest.chars().next() {
            match c {
                'd' => {
                    let token = match self.take_run(c, 4) {
                        1 => Token::Day,
                        2 => Token::DayPadded,
                        3 => Token::WeekdayShort,
                        _ => Token::WeekdayLong,
                    };
                    self.token(token);
                }
                'm' => {
                    let token = match self.take_run(c, 4) {
                        1 => Token::Month,
                        2 => Token::MonthPadded,
                        3 => Token::MonthShort,
                        _ => Token::MonthLong,
                    };
                    self.token(token);
                }
                // `yyy` only matches `yy`; its third `y` is scanned again.
                'y' => match self.run_len(c, 4) {
                    4 => {
                        self.advance(4);
                        self.token(Token::Year4);
                    }
                    1 => {
                        self.advance(1);
                        self.literal.push('y');
                    }
                    _ => {
                        self.advance(2);
                        self.token(Token::Year2);
                    }
                },
                'H' | 'h' | 'M' | 's' | 'T' | 't' => {
                    let doubled = self.take_run(c, 2) == 2;
                    self.token(paired(c, doubled));
                }
                'L' => self.single(Token::Hundredths),
                'l' => self.single(Token::Millis),
                'o' => self.single(Token::Offset),
                'S' => self.single(Token::Ordinal),
                'Z' => self.single(Token::ZoneName),
                'W' => self.single(Token::IsoWeek),
                'N' => self.single(Token::IsoWeekday),
                '\'' | '"' => self.quoted(c),
                _ => {
                    self.literal.push(c);
                    self.advance(c.len_utf8());
                }
            }
        }

        self.flush();
        self.pieces
    }

    /// Length of the run of the ASCII char `c` at the cursor, capped at `max`.
    fn run_len(&self, c: char, max: usize) -> usize {
        self.rest
            .bytes()
            .take(max)
            .take_while(|&b| b == c as u8)
            .count()
    }

    fn take_run(&mut self, c: char, max: usize) -> usize {
        let n = self.run_len(c, max);
        self.advance(n);
        n
    }

    fn advance(&mut self, n: usize) {
        self.rest = &self.rest[n..];
    }

    fn single(&mut self, token: Token) {
        self.advance(1);
        self.token(token);
    }

    fn quoted(&mut self, quote: char) {
        let body = &self.rest[1..];
        match body.find(quote) {
            Some(end) => {
                self.literal.push_str(&body[..end]);
                self.rest = &body[end + 1..];
            }
            None => {
                self.literal.push(quote);
                self.rest = body;
            }
        }
    }

    fn token(&mut self, token: Token) {
        self.flush();
        self.pieces.push(Piece::Token(token));
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            self.pieces
                .push(Piece::Literal(std::mem::take(&mut self.literal)));
        }
    }
}

fn paired(c: char, doubled: bool) -> Token {
    match (c, doubled) {
        ('h', false) => Token::Hour12,
        ('h', true) => Token::Hour12Padded,
        ('H', false) => Token::Hour24,
        ('H', true) => Token::Hour24Padded,
        ('M', false) => Token::Minute,
        ('M', true) => Token::MinutePadded,
        ('s', false) => Token::Second,
        ('s', true) => Token::SecondPadded,
        ('t', false) => Token::MeridiemShortLower,
        ('t', true) => Token::MeridiemLongLower,
        ('T', false) => Token::MeridiemShortUpper,
        _ => Token::MeridiemLongUpper,
    }
}

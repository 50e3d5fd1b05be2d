// Mapping delle caselle: row 0 = sesta traversa (lato nero), row 5 = prima traversa (lato bianco)
// col 0..4 = colonne a..e. Usiamo questo mapping coerente per tutte le operazioni.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

pub const ROWS: usize = 6;
pub const COLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step: white walks toward row 0, black toward row 5.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Back rank the side starts on.
    pub fn home_row(self) -> usize {
        match self {
            Color::White => ROWS - 1,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Layout character: uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(color, kind))
    }
}

/// A square on the 6x5 board. Always in range once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Square displaced by (dr, dc), or None when it falls off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as usize, col as usize)
    }

    pub fn manhattan(self, other: Square) -> usize {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col())
    }

    /// All 30 squares, row-major then column-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..ROWS).flat_map(|row| {
            (0..COLS).map(move |col| Square {
                row: row as u8,
                col: col as u8,
            })
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = ROWS - self.row();
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    /// "a1" is white's back-rank corner (row 5, col 0); "e6" is row 0, col 4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::Square(s.to_string()));
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..b'a' + COLS as u8).contains(&file) || !(b'1'..b'1' + ROWS as u8).contains(&rank)
        {
            return Err(ParseError::Square(s.to_string()));
        }
        let col = (file - b'a') as usize;
        let row = ROWS - 1 - (rank - b'1') as usize;
        Self::new(row, col).ok_or_else(|| ParseError::Square(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ParseError::Move(s.to_string()));
        }
        let from = s[0..2]
            .parse()
            .map_err(|_| ParseError::Move(s.to_string()))?;
        let to = s[2..4]
            .parse()
            .map_err(|_| ParseError::Move(s.to_string()))?;
        Ok(Self::new(from, to))
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const BACK_RANK: [PieceKind; COLS] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
];

pub const START_LAYOUT: &str = "rnbqk/ppppp/5/5/PPPPP/RNBQK w";

/// A position: the 6x5 grid plus the side to move.
///
/// `Board` is `Copy`; search explores every branch on its own copy so
/// siblings never observe each other's mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; COLS]; ROWS],
    pub side: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::start()
    }
}

impl Board {
    // Board vuota da popolare via layout o set_piece
    pub fn empty() -> Self {
        Self {
            squares: [[None; COLS]; ROWS],
            side: Color::White,
        }
    }

    /// Initial setup: back ranks R N B Q K on rows 0 (black) and 5 (white),
    /// pawns on rows 1 (black) and 4 (white). White moves first.
    pub fn start() -> Self {
        let mut board = Self::empty();
        for col in 0..COLS {
            board.squares[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.squares[ROWS - 2][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.squares[0][col] = Some(Piece::new(Color::Black, BACK_RANK[col]));
            board.squares[ROWS - 1][col] = Some(Piece::new(Color::White, BACK_RANK[col]));
        }
        board
    }

    /// Out-of-range coordinates read as an empty square.
    pub fn get_piece(&self, row: i32, col: i32) -> Option<Piece> {
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize).and_then(|sq| self.piece_at(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.row()][sq.col()] = Some(piece);
    }

    pub fn clear_square(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()].take()
    }

    /// Pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Relocates the piece on `mv.from` to `mv.to`, returning whatever was
    /// captured. No legality check and no side flip.
    pub fn move_piece(&mut self, mv: Move) -> Option<Piece> {
        let moving = self.clear_square(mv.from);
        let captured = self.squares[mv.to.row()][mv.to.col()];
        self.squares[mv.to.row()][mv.to.col()] = moving;
        captured
    }

    /// Copy of the position after `mv`, with the side to move flipped.
    pub fn make_move(&self, mv: Move) -> Board {
        let mut next = *self;
        next.move_piece(mv);
        next.side = self.side.opponent();
        next
    }

    // Generazione mosse ------------------------------------------

    /// Destinations obeying the piece's movement pattern, ignoring own-king
    /// safety. Empty for an empty square.
    pub fn pseudo_legal_moves(&self, sq: Square) -> Vec<Square> {
        let mut out = Vec::with_capacity(16);
        if let Some(piece) = self.piece_at(sq) {
            self.generate_pseudo(sq, piece, &mut out);
        }
        out
    }

    fn generate_pseudo(&self, from: Square, piece: Piece, out: &mut Vec<Square>) {
        match piece.kind {
            PieceKind::Pawn => self.push_pawn_moves(from, piece.color, out),
            PieceKind::Knight => self.push_steps(from, piece.color, &KNIGHT_OFFSETS, out),
            PieceKind::Bishop => self.push_rays(from, piece.color, &DIAGONAL_DIRS, out),
            PieceKind::Rook => self.push_rays(from, piece.color, &ORTHOGONAL_DIRS, out),
            PieceKind::Queen => {
                self.push_rays(from, piece.color, &ORTHOGONAL_DIRS, out);
                self.push_rays(from, piece.color, &DIAGONAL_DIRS, out);
            }
            PieceKind::King => self.push_steps(from, piece.color, &KING_OFFSETS, out),
        }
    }

    // Niente doppio passo, en passant o promozione su questa scacchiera
    fn push_pawn_moves(&self, from: Square, color: Color, out: &mut Vec<Square>) {
        let dir = color.pawn_direction();
        if let Some(to) = from.offset(dir, 0) {
            if self.piece_at(to).is_none() {
                out.push(to);
            }
        }
        for dc in [-1, 1] {
            if let Some(to) = from.offset(dir, dc) {
                if matches!(self.piece_at(to), Some(p) if p.color != color) {
                    out.push(to);
                }
            }
        }
    }

    fn push_steps(&self, from: Square, color: Color, offsets: &[(i8, i8)], out: &mut Vec<Square>) {
        for &(dr, dc) in offsets {
            if let Some(to) = from.offset(dr, dc) {
                match self.piece_at(to) {
                    Some(p) if p.color == color => {}
                    _ => out.push(to),
                }
            }
        }
    }

    fn push_rays(&self, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
        for &(dr, dc) in dirs {
            let mut cur = from;
            while let Some(to) = cur.offset(dr, dc) {
                match self.piece_at(to) {
                    None => out.push(to),
                    Some(p) => {
                        if p.color != color {
                            out.push(to);
                        }
                        break;
                    }
                }
                cur = to;
            }
        }
    }

    /// Pseudo-legal destinations that do not leave the mover's king in check.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        let Some(piece) = self.piece_at(sq) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(16);
        self.generate_pseudo(sq, piece, &mut out);
        out.retain(|&to| self.keeps_king_safe(Move::new(sq, to), piece.color));
        out
    }

    fn keeps_king_safe(&self, mv: Move, color: Color) -> bool {
        let mut scratch = *self;
        scratch.move_piece(mv);
        !scratch.is_in_check(color)
    }

    /// All legal moves of `color`, row-major by origin square, destinations
    /// in generation order.
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        let mut dests = Vec::with_capacity(16);
        for (from, piece) in self.pieces(color) {
            dests.clear();
            self.generate_pseudo(from, piece, &mut dests);
            for &to in &dests {
                let mv = Move::new(from, to);
                if self.keeps_king_safe(mv, color) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    pub fn legal_move_count(&self, color: Color) -> usize {
        self.pieces(color)
            .map(|(sq, _)| self.legal_moves(sq).len())
            .sum()
    }

    // Legality helpers -------------------------------------------

    /// True when some `by` piece has a pseudo-legal move onto `sq`, assuming
    /// `sq` held a piece of the other colour. Reverse lookup from the target.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let holds = |target: Option<Square>, kinds: &[PieceKind]| {
            matches!(
                target.and_then(|t| self.piece_at(t)),
                Some(p) if p.color == by && kinds.contains(&p.kind)
            )
        };

        // A `by` pawn attacks diagonally forward, so it sits one step behind.
        let back = -by.pawn_direction();
        if holds(sq.offset(back, -1), &[PieceKind::Pawn])
            || holds(sq.offset(back, 1), &[PieceKind::Pawn])
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(dr, dc)| holds(sq.offset(dr, dc), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(dr, dc)| holds(sq.offset(dr, dc), &[PieceKind::King]))
        {
            return true;
        }

        let first_blocker = |dr: i8, dc: i8| {
            let mut cur = sq;
            while let Some(next) = cur.offset(dr, dc) {
                if self.piece_at(next).is_some() {
                    return Some(next);
                }
                cur = next;
            }
            None
        };

        ORTHOGONAL_DIRS
            .iter()
            .any(|&(dr, dc)| holds(first_blocker(dr, dc), &[PieceKind::Rook, PieceKind::Queen]))
            || DIAGONAL_DIRS.iter().any(|&(dr, dc)| {
                holds(first_blocker(dr, dc), &[PieceKind::Bishop, PieceKind::Queen])
            })
    }

    /// A missing king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces(color)
            .any(|(sq, _)| !self.legal_moves(sq).is_empty())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }
}

/// Number of legal move sequences of length `depth` from `board`, starting
/// with the side to move.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.generate_moves(board.side);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&board.make_move(mv), depth - 1))
        .sum()
}

// Layout parsing/setter su Board
impl Board {
    /// Parses a layout string: six '/'-separated rows starting at row 0,
    /// digits for runs of empty squares, then an optional `w`/`b` side.
    pub fn from_layout(layout: &str) -> Result<Self, ParseError> {
        let mut parts = layout.split_whitespace();
        let rows_part = parts
            .next()
            .ok_or_else(|| ParseError::Layout("empty layout".to_string()))?;
        let side = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(ParseError::Side(other.to_string())),
        };
        if let Some(extra) = parts.next() {
            return Err(ParseError::Layout(format!("unexpected trailing field '{}'", extra)));
        }

        let rows: Vec<&str> = rows_part.split('/').collect();
        if rows.len() != ROWS {
            return Err(ParseError::Layout(format!(
                "expected {} rows, found {}",
                ROWS,
                rows.len()
            )));
        }

        let mut board = Self::empty();
        board.side = side;
        for (row, row_part) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in row_part.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 || run as usize > COLS {
                        return Err(ParseError::Layout(format!(
                            "empty run '{}' in row {} must be 1-{}",
                            ch, row, COLS
                        )));
                    }
                    col += run as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or_else(|| {
                        ParseError::Layout(format!("invalid piece char '{}'", ch))
                    })?;
                    let sq = Square::new(row, col).ok_or_else(|| {
                        ParseError::Layout(format!("row {} is longer than {} columns", row, COLS))
                    })?;
                    board.set_piece(sq, piece);
                    col += 1;
                }
            }
            if col != COLS {
                return Err(ParseError::Layout(format!(
                    "row {} covers {} columns, expected {}",
                    row, col, COLS
                )));
            }
        }
        Ok(board)
    }

    pub fn to_layout(&self) -> String {
        let mut out = String::new();
        for row in 0..ROWS {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..COLS {
                match self.squares[row][col] {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out.push(' ');
        out.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{} ", ROWS - row)?;
            for col in 0..COLS {
                match self.squares[row][col] {
                    Some(p) => write!(f, "{} ", p.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..COLS {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}

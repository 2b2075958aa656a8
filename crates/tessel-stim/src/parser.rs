//! Parser for stim circuit text.

use tessel_ir::{
    Basis, Circuit, Instruction, InstructionKind, NoiseModel, QubitId, RecordOffset, StandardGate,
};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse stim circuit text into a program.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    let circuit = parser.parse_block(false)?;
    Ok(circuit)
}

/// Target operand of one instruction line.
#[derive(Debug, Clone, Copy)]
enum Target {
    Qubit(u64),
    Record(i64),
}

/// What an instruction name resolves to, before its targets are known.
#[derive(Debug, Clone, Copy)]
enum Opcode {
    Kind(InstructionKind),
    Noise(fn(f64) -> NoiseModel),
    Observable,
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    line: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((line, message)) => return Err(ParseError::LexerError { line, message }),
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            line: 1,
        })
    }

    /// Peek at the current token.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    fn advance(&mut self) -> Option<Token> {
        let spanned = self.tokens.get(self.pos)?;
        self.line = spanned.line;
        self.pos += 1;
        Some(spanned.token.clone())
    }

    /// Consume token if it matches.
    fn consume(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line,
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    fn eof(&self, context: &str) -> ParseError {
        ParseError::UnexpectedEof {
            line: self.line,
            context: context.into(),
        }
    }

    /// Expect the end of the current line (or of the input).
    fn expect_line_end(&mut self) -> ParseResult<()> {
        match self.advance() {
            None | Some(Token::Newline) => Ok(()),
            Some(other) => Err(self.unexpected("end of line", &other)),
        }
    }

    /// Parse lines until end of input, or until the closing `}` of a block.
    fn parse_block(&mut self, nested: bool) -> ParseResult<Circuit> {
        let mut circuit = Circuit::new();
        loop {
            let Some(token) = self.advance() else {
                if nested {
                    return Err(self.eof("missing '}' to close REPEAT block"));
                }
                return Ok(circuit);
            };
            match token {
                Token::Newline => {}
                Token::RBrace => {
                    if !nested {
                        return Err(ParseError::UnmatchedBrace { line: self.line });
                    }
                    self.expect_line_end()?;
                    return Ok(circuit);
                }
                Token::Identifier(name) if name.eq_ignore_ascii_case("REPEAT") => {
                    self.parse_repeat(&mut circuit)?;
                }
                Token::Identifier(name) => self.parse_instruction(&name, &mut circuit)?,
                other => return Err(self.unexpected("instruction name", &other)),
            }
        }
    }

    /// Parse `REPEAT n {` ... `}` after the keyword.
    fn parse_repeat(&mut self, circuit: &mut Circuit) -> ParseResult<()> {
        let line = self.line;
        let count = match self.advance() {
            Some(Token::IntLiteral(n)) => n,
            Some(other) => return Err(self.unexpected("repeat count", &other)),
            None => return Err(self.eof("repeat count")),
        };
        if count == 0 {
            return Err(ParseError::InvalidRepeatCount { line });
        }
        match self.advance() {
            Some(Token::LBrace) => {}
            Some(other) => return Err(self.unexpected("'{'", &other)),
            None => return Err(self.eof("'{'")),
        }
        self.expect_line_end()?;
        let body = self.parse_block(true)?;
        circuit.append(&body.repeated(count));
        Ok(())
    }

    /// Parse `NAME(args) targets` after the name.
    fn parse_instruction(&mut self, name: &str, circuit: &mut Circuit) -> ParseResult<()> {
        let line = self.line;
        let canonical = name.to_ascii_uppercase();
        let opcode = resolve(&canonical).ok_or_else(|| ParseError::UnknownInstruction {
            line,
            name: name.to_string(),
        })?;

        let args = if self.consume(&Token::LParen) {
            self.parse_args()?
        } else {
            vec![]
        };

        let mut targets = Vec::new();
        loop {
            match self.peek() {
                None | Some(Token::Newline) => break,
                Some(_) => {}
            }
            match self.advance() {
                Some(Token::IntLiteral(q)) => targets.push(Target::Qubit(q)),
                Some(Token::Record(k)) => targets.push(Target::Record(k)),
                Some(other) => return Err(self.unexpected("qubit or record target", &other)),
                None => break,
            }
        }
        self.expect_line_end()?;

        let instruction = build(&canonical, opcode, &args, &targets, line)?;
        circuit
            .push(instruction)
            .map_err(|source| ParseError::CircuitError { line, source })?;
        Ok(())
    }

    /// Parse a comma-separated argument list after `(`.
    fn parse_args(&mut self) -> ParseResult<Vec<f64>> {
        let mut args = Vec::new();
        if self.consume(&Token::RParen) {
            return Ok(args);
        }
        loop {
            match self.advance() {
                #[allow(clippy::cast_precision_loss)]
                Some(Token::IntLiteral(v)) => args.push(v as f64),
                Some(Token::FloatLiteral(v)) => args.push(v),
                Some(other) => return Err(self.unexpected("number", &other)),
                None => return Err(self.eof("argument list")),
            }
            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RParen) => return Ok(args),
                Some(other) => return Err(self.unexpected("',' or ')'", &other)),
                None => return Err(self.eof("argument list")),
            }
        }
    }
}

/// Map an upper-cased instruction name (aliases included) to its opcode.
fn resolve(name: &str) -> Option<Opcode> {
    let kind = match name {
        "H" => InstructionKind::Gate(StandardGate::H),
        "CX" | "CNOT" | "ZCX" => InstructionKind::Gate(StandardGate::CX),
        "R" | "RZ" => InstructionKind::Reset(Basis::Z),
        "RX" => InstructionKind::Reset(Basis::X),
        "M" | "MZ" => InstructionKind::Measure(Basis::Z),
        "MX" => InstructionKind::Measure(Basis::X),
        "MR" | "MRZ" => InstructionKind::MeasureReset(Basis::Z),
        "MRX" => InstructionKind::MeasureReset(Basis::X),
        "TICK" => InstructionKind::Tick,
        "QUBIT_COORDS" => InstructionKind::QubitCoords,
        "DETECTOR" => InstructionKind::Detector,
        "SHIFT_COORDS" => InstructionKind::ShiftCoords,
        "DEPOLARIZE1" => return Some(Opcode::Noise(|p| NoiseModel::Depolarize1 { p })),
        "DEPOLARIZE2" => return Some(Opcode::Noise(|p| NoiseModel::Depolarize2 { p })),
        "X_ERROR" => return Some(Opcode::Noise(|p| NoiseModel::BitFlip { p })),
        "Z_ERROR" => return Some(Opcode::Noise(|p| NoiseModel::PhaseFlip { p })),
        "OBSERVABLE_INCLUDE" => return Some(Opcode::Observable),
        _ => return None,
    };
    Some(Opcode::Kind(kind))
}

/// Assemble an instruction, checking argument counts and target kinds.
fn build(
    name: &str,
    opcode: Opcode,
    args: &[f64],
    targets: &[Target],
    line: usize,
) -> ParseResult<Instruction> {
    let arg_count = |expected: usize| -> ParseResult<()> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongArgumentCount {
                line,
                name: name.to_string(),
                expected,
                got: args.len(),
            })
        }
    };
    let invalid = |target: String| ParseError::InvalidTarget {
        line,
        name: name.to_string(),
        target,
    };
    let qubits = || -> ParseResult<Vec<QubitId>> {
        targets
            .iter()
            .map(|t| match *t {
                Target::Qubit(q) => u32::try_from(q)
                    .map(QubitId)
                    .map_err(|_| invalid(q.to_string())),
                Target::Record(k) => Err(invalid(format!("rec[{k}]"))),
            })
            .collect()
    };
    let records = || -> ParseResult<Vec<RecordOffset>> {
        targets
            .iter()
            .map(|t| match *t {
                Target::Record(k) => {
                    RecordOffset::from_i64(k).map_err(|_| invalid(format!("rec[{k}]")))
                }
                Target::Qubit(q) => Err(invalid(q.to_string())),
            })
            .collect()
    };

    match opcode {
        Opcode::Noise(make) => {
            arg_count(1)?;
            Ok(Instruction::noise(make(args[0]), qubits()?))
        }
        Opcode::Observable => {
            arg_count(1)?;
            let index = args[0];
            if index < 0.0 || index.fract() != 0.0 || index > f64::from(u32::MAX) {
                return Err(invalid(format!("observable index {index}")));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = index as u32;
            Ok(Instruction::observable_include(index, records()?))
        }
        Opcode::Kind(kind) => match kind {
            InstructionKind::Detector => Ok(Instruction::detector(records()?, args)),
            InstructionKind::ShiftCoords => {
                if !targets.is_empty() {
                    return Err(invalid("SHIFT_COORDS takes no targets".into()));
                }
                Ok(Instruction::shift_coords(args))
            }
            InstructionKind::QubitCoords => {
                let qubits = qubits()?;
                let &[qubit] = qubits.as_slice() else {
                    return Err(invalid(format!("{} targets", qubits.len())));
                };
                Ok(Instruction::qubit_coords(qubit, args))
            }
            InstructionKind::Tick => {
                arg_count(0)?;
                if !targets.is_empty() {
                    return Err(invalid("TICK takes no targets".into()));
                }
                Ok(Instruction::tick())
            }
            _ => {
                arg_count(0)?;
                Ok(Instruction {
                    kind,
                    qubits: qubits()?,
                    records: vec![],
                    args: vec![],
                })
            }
        },
    }
}

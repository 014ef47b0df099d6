//! Test-only reader for encoded streams.

use aotir_core::Program;
use aotir_format::{Header, OperandKind, Opcode, Predicate, TypeKind, WordSize};

use crate::{EncodedModule, EncoderConfig, serialise};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Constant(u64),
    Local { block: u64, inst: u64 },
    Type(u64),
    Function(u64),
    Block(u64),
    Arg(u64),
    Global(u64),
    Predicate(Predicate),
    Unimplemented(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inst {
    pub ty: u64,
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub name: String,
    pub ty: u64,
    pub blocks: Vec<Vec<Inst>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
    pub ty: u64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    pub thread_local: bool,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Void,
    Int(u32),
    Ptr,
    Func {
        params: Vec<u64>,
        ret: u64,
        vararg: bool,
    },
    Struct {
        fields: Vec<u64>,
        bit_offsets: Vec<u64>,
    },
    Unimplemented(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub header: Header,
    pub functions: Vec<Func>,
    pub constants: Vec<Const>,
    pub globals: Vec<Global>,
    pub types: Vec<Ty>,
}

impl Stream {
    pub fn function(&self, name: &str) -> &Func {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no function `{name}` in stream"))
    }

    pub fn ty(&self, index: u64) -> &Ty {
        &self.types[index as usize]
    }

    pub fn constant(&self, index: u64) -> &Const {
        &self.constants[index as usize]
    }

    /// Index of the integer type of the given width.
    pub fn int_type(&self, bits: u32) -> u64 {
        self.types
            .iter()
            .position(|t| *t == Ty::Int(bits))
            .unwrap_or_else(|| panic!("no i{bits} in type table")) as u64
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    word: WordSize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take(4).try_into().unwrap())
    }

    fn size(&mut self) -> u64 {
        match self.word {
            WordSize::Four => u64::from(self.u32()),
            WordSize::Eight => u64::from_le_bytes(self.take(8).try_into().unwrap()),
        }
    }

    fn cstr(&mut self) -> String {
        let len = self.bytes[self.pos..]
            .iter()
            .position(|&b| b == 0)
            .expect("unterminated string");
        let s = String::from_utf8(self.take(len).to_vec()).unwrap();
        self.pos += 1;
        s
    }

    fn operand(&mut self) -> Operand {
        let kind = OperandKind::from_u8(self.u8()).expect("bad operand kind");
        match kind {
            OperandKind::Constant => Operand::Constant(self.size()),
            OperandKind::LocalVariable => Operand::Local {
                block: self.size(),
                inst: self.size(),
            },
            OperandKind::Type => Operand::Type(self.size()),
            OperandKind::Function => Operand::Function(self.size()),
            OperandKind::Block => Operand::Block(self.size()),
            OperandKind::Arg => Operand::Arg(self.size()),
            OperandKind::Global => Operand::Global(self.size()),
            OperandKind::Predicate => {
                Operand::Predicate(Predicate::from_byte(self.u8()).expect("bad predicate"))
            }
            OperandKind::Unimplemented => Operand::Unimplemented(self.cstr()),
        }
    }

    fn inst(&mut self) -> Inst {
        let ty = self.size();
        let opcode = Opcode::from_u8(self.u8()).expect("bad opcode");
        let n = self.u32();
        let operands: Vec<Operand> = (0..n).map(|_| self.operand()).collect();
        Inst {
            ty,
            opcode,
            operands,
        }
    }

    fn function(&mut self) -> Func {
        let name = self.cstr();
        let ty = self.size();
        let nblocks = self.size();
        let blocks: Vec<Vec<Inst>> = (0..nblocks)
            .map(|_| {
                let n = self.size();
                (0..n).map(|_| self.inst()).collect::<Vec<_>>()
            })
            .collect();
        Func { name, ty, blocks }
    }

    fn constant(&mut self) -> Const {
        let ty = self.size();
        let n = self.size() as usize;
        Const {
            ty,
            bytes: self.take(n).to_vec(),
        }
    }

    fn global(&mut self) -> Global {
        let thread_local = self.u8() != 0;
        Global {
            thread_local,
            name: self.cstr(),
        }
    }

    fn ty(&mut self) -> Ty {
        match TypeKind::from_u8(self.u8()).expect("bad type kind") {
            TypeKind::Void => Ty::Void,
            TypeKind::Integer => Ty::Int(self.u32()),
            TypeKind::Ptr => Ty::Ptr,
            TypeKind::Function => {
                let n = self.size();
                let params: Vec<u64> = (0..n).map(|_| self.size()).collect();
                let ret = self.size();
                let vararg = self.u8() != 0;
                Ty::Func {
                    params,
                    ret,
                    vararg,
                }
            }
            TypeKind::Struct => {
                let n = self.size();
                let fields: Vec<u64> = (0..n).map(|_| self.size()).collect();
                let bit_offsets: Vec<u64> = (0..n).map(|_| self.size()).collect();
                Ty::Struct {
                    fields,
                    bit_offsets,
                }
            }
            TypeKind::Unimplemented => Ty::Unimplemented(self.cstr()),
        }
    }

    fn section<T>(&mut self, mut read: impl FnMut(&mut Self) -> T) -> Vec<T> {
        let n = self.size();
        (0..n).map(|_| read(self)).collect()
    }
}

/// Parse a whole stream, asserting nothing trails it.
pub fn read_stream(bytes: &[u8], word: WordSize) -> Stream {
    let header = Header::from_bytes(bytes).unwrap();
    let mut r = Reader {
        bytes,
        pos: aotir_format::HEADER_SIZE,
        word,
    };
    let functions = r.section(Reader::function);
    let constants = r.section(Reader::constant);
    let globals = r.section(Reader::global);
    let types = r.section(Reader::ty);
    assert_eq!(r.pos, bytes.len(), "trailing bytes after type section");
    Stream {
        header,
        functions,
        constants,
        globals,
        types,
    }
}

pub fn encode_json(json: &str) -> EncodedModule {
    encode_json_with(json, EncoderConfig::default())
}

pub fn encode_json_with(json: &str, config: EncoderConfig) -> EncodedModule {
    let program = Program::from_json(json).unwrap();
    serialise(&program, &config).unwrap()
}

/// Encode a JSON program and read the result back.
pub fn roundtrip(json: &str) -> Stream {
    let module = encode_json(json);
    read_stream(&module.bytes, module.word_size)
}

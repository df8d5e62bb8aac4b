//! Type Intermediate Representation (TIR) code generation.
//!
//! This module turns the fully resolved AST (signatures and scopes already
//! built by [`crate::tir::resolver`]) into the register-based, basic-block
//! form the bytecode emitter consumes. Generation is a read-only pass over
//! [`TirContext`]: every type and symbol question it asks was already
//! answered during the resolve/finish phases, so the generator only ever
//! needs to replay those answers into instructions, never re-validate them.
//!
//! A function body becomes a [`CodeObject`]: a flat list of [`BasicBlock`]s
//! of [`Instruction`]s operating on freshly numbered [`Register`]s, plus a
//! catch table pairing try/else blocks with the register that receives a
//! thrown value. One [`CodeObject`] is produced per module (holding the
//! import-loading block) and one per function or method body, nested as
//! children of their owning module's code object.

use std::ops::Range;

use strum_macros::{Display, EnumString};

use crate::{
    ast::{
        BodyAst, BodyStatementAst, ExpressionAst, ExpressionOperatorType, FileStatementAst,
        FunctionCallAst, FunctionDefinitionAst, IfConditionAst, PrimitiveValue, VariableAssignAst,
        VariableDefinitionAst,
    },
    nom_tools::{Span, ToRange},
    tir::{
        context::TirContext,
        object_signature::TypeValue,
        resolver::{ResolveAst, TypeLocation},
        scope::ScopeLocation,
        TirError,
    },
};

/// Opcodes emitted by the generator. Named after the bytecode operations the
/// lowering rules below produce; the `EnumString`/`Display` derives let the
/// raw-instruction intrinsic bridge (source text naming an opcode) parse a
/// name back into this enum the same way the lexer turns keyword text into
/// token variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Opcode {
    SetLiteral,
    GetLocal,
    SetLocal,
    GetParentLocal,
    SetParentLocal,
    GetGlobal,
    SetGlobal,
    GetAttribute,
    SetAttribute,
    SetArray,
    RunBlock,
    Return,
    Not,
    GotoNextBlockIfTrue,
    SkipNextBlock,
    LoadModule,
    Panic,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Equal,
    NotEqual,
    GreaterEqualThan,
    GreaterThan,
    LessEqualThan,
    LessThan,
    Xor,
    LogicalOr,
    LogicalAnd,
    BitwiseShiftLeft,
    BitwiseShiftRight,
}

impl Opcode {
    fn from_operator(operator: ExpressionOperatorType) -> Self {
        match operator {
            ExpressionOperatorType::Add => Opcode::Add,
            ExpressionOperatorType::Sub => Opcode::Sub,
            ExpressionOperatorType::Mul => Opcode::Mul,
            ExpressionOperatorType::Div => Opcode::Div,
            ExpressionOperatorType::Mod => Opcode::Mod,
            ExpressionOperatorType::And => Opcode::And,
            ExpressionOperatorType::Or => Opcode::Or,
            ExpressionOperatorType::Equal => Opcode::Equal,
            ExpressionOperatorType::NotEqual => Opcode::NotEqual,
            ExpressionOperatorType::GreaterEqualThan => Opcode::GreaterEqualThan,
            ExpressionOperatorType::GreaterThan => Opcode::GreaterThan,
            ExpressionOperatorType::LessEqualThan => Opcode::LessEqualThan,
            ExpressionOperatorType::LessThan => Opcode::LessThan,
            ExpressionOperatorType::Xor => Opcode::Xor,
            ExpressionOperatorType::LogicalOr => Opcode::LogicalOr,
            ExpressionOperatorType::LogicalAnd => Opcode::LogicalAnd,
            ExpressionOperatorType::BitwiseShiftLeft => Opcode::BitwiseShiftLeft,
            ExpressionOperatorType::BitwiseShiftRight => Opcode::BitwiseShiftRight,
        }
    }
}

/// Inline literal argument carried by a [`SetLiteral`](Opcode::SetLiteral)
/// instruction, or by the synthetic `SetLiteral` used to materialize a
/// message name for an unknown-message send.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Symbol(String),
}

/// A freshly numbered typed value slot. Registers are SSA-like: each is
/// written exactly once, by the instruction that declares it as destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(pub usize);

/// Per-[`CodeObject`] table of register types, indexed by [`Register::0`].
#[derive(Debug, Clone, Default)]
pub struct RegisterTable {
    types: Vec<TypeLocation>,
}

impl RegisterTable {
    pub fn allocate(&mut self, type_location: TypeLocation) -> Register {
        let register = Register(self.types.len());
        self.types.push(type_location);
        register
    }

    pub fn type_of(&self, register: Register) -> TypeLocation {
        self.types[register.0]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A single instruction: one opcode, an optional destination register, zero
/// or more operand registers, an optional inline literal, and the source
/// location it was lowered from (for runtime panics/diagnostics).
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub destination: Option<Register>,
    pub operands: Vec<Register>,
    pub literal: Option<Literal>,
    pub location: Range<usize>,
}

impl Instruction {
    fn is_terminator(&self) -> bool {
        matches!(self.opcode, Opcode::Return | Opcode::Panic)
    }
}

/// An ordered list of instructions. `reachable` is decided at construction
/// time by which of [`CodeObject::add_basic_block`] (unreachable successor)
/// or [`CodeObject::add_connected_basic_block`] (fallthrough successor) the
/// generator used to create it, rather than by a separate post-pass: control
/// flow in this language is structured enough (no arbitrary jumps, only
/// `if`/`else` and guarded sends) that the generator always knows at the
/// point of creation whether a block falls out of the one before it.
#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub id: usize,
    pub reachable: bool,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    fn new(id: usize, reachable: bool) -> Self {
        Self { id, reachable, instructions: Vec::new() }
    }

    pub fn is_terminated(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }
}

/// Pairs a try block with its else block and the register that receives the
/// value thrown inside the try block. Kept as part of the code object shape
/// the way the component design calls for; this grammar has no `try`/`throw`
/// expression, so no entry is ever constructed by the generator today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchTableEntry {
    pub try_block: usize,
    pub else_block: usize,
    pub register: Register,
}

/// A generated function/method body (or a module's top-level body): its
/// register table, its basic blocks, its catch table, and any nested code
/// objects (module code objects nest one child per function/method).
#[derive(Debug, Clone)]
pub struct CodeObject {
    pub name: String,
    pub signature: TypeLocation,
    pub location: Range<usize>,
    pub register_table: RegisterTable,
    pub blocks: Vec<BasicBlock>,
    pub catch_table: Vec<CatchTableEntry>,
    pub children: Vec<CodeObject>,
}

impl CodeObject {
    fn new(name: String, signature: TypeLocation, location: Range<usize>) -> Self {
        Self {
            name,
            signature,
            location,
            register_table: RegisterTable::default(),
            blocks: vec![BasicBlock::new(0, true)],
            catch_table: Vec::new(),
            children: Vec::new(),
        }
    }

    fn current_block(&self) -> usize {
        self.blocks.len() - 1
    }

    /// Appends a new, not-yet-reachable successor block (e.g. the `else`
    /// branch of an `if` whose `then` branch just ended in `return`).
    fn add_basic_block(&mut self) -> usize {
        let id = self.blocks.len();
        self.blocks.push(BasicBlock::new(id, false));
        id
    }

    /// Appends a new successor block reachable by falling out of whichever
    /// block generation is currently writing into.
    fn add_connected_basic_block(&mut self) -> usize {
        let id = self.blocks.len();
        self.blocks.push(BasicBlock::new(id, true));
        id
    }

    fn mark_reachable(&mut self, id: usize) {
        if let Some(block) = self.blocks.get_mut(id) {
            block.reachable = true;
        }
    }

    fn register(&mut self, type_location: TypeLocation) -> Register {
        self.register_table.allocate(type_location)
    }

    fn instruct(
        &mut self,
        block: usize,
        opcode: Opcode,
        destination: Option<Register>,
        operands: Vec<Register>,
        literal: Option<Literal>,
        location: Range<usize>,
    ) {
        self.blocks[block].instructions.push(Instruction { opcode, destination, operands, literal, location });
    }

    /// Closes out the body: per the code object invariant, the last
    /// reachable block must end in a terminator. If generation left it
    /// without one (the body fell off the end with no explicit `return`),
    /// append an implicit `Return` of the last computed value, or of a fresh
    /// `Nil` literal register if nothing was computed.
    fn finalize(&mut self, void_type: TypeLocation, location: Range<usize>) {
        let last = self.current_block();
        if self.blocks[last].is_terminated() {
            return;
        }

        let value = self.blocks[last]
            .instructions
            .last()
            .and_then(|instruction| instruction.destination);

        let value = match value {
            Some(register) => register,
            None => {
                let register = self.register(void_type);
                self.instruct(last, Opcode::SetLiteral, Some(register), vec![], None, location.clone());
                register
            }
        };

        self.instruct(last, Opcode::Return, None, vec![value], None, location);
    }
}

/// Generates code objects for every import, function, and method defined in
/// `module_path`. Returns one top-level [`CodeObject`] representing the
/// module's body (its first block loads the module's imports); every
/// function and method defined in the module becomes a child code object.
pub fn generate_module<'base>(context: &TirContext<'base>, module_path: &str) -> Result<CodeObject, TirError> {
    let module = context.modules.get(module_path).unwrap_or_else(|| panic!("Module not found, it is a bug: {module_path}"));
    let module_location = module.file.clone();

    let mut module_object = CodeObject::new(module_path.to_string(), TypeLocation::UNDEFINED, 0..0);
    generate_imports(context, &mut module_object, module_path);

    let Some(ast) = module.ast.clone() else {
        return Ok(module_object);
    };

    for statement in ast.statements.iter() {
        match statement {
            FileStatementAst::Function(function) => {
                let full_name = format!("{module_path}.{}", function.name());
                module_object.children.push(generate_function(context, function, &full_name)?);
            }
            FileStatementAst::Class(class) => {
                for field in class.fields.iter() {
                    if let crate::ast::ClassDefinitionFieldAst::Function(method) = field {
                        let full_name = format!("{module_path}.{}", method.name());
                        module_object.children.push(generate_function(context, method, &full_name)?);
                    }
                }
            }
            FileStatementAst::Extend(extend) => {
                let class_name = format!("{module_path}.{}", extend.name.names.first().unwrap().text);
                for field in extend.fields.iter() {
                    if let crate::ast::ExtendDefinitionFieldAst::Function(method) = field {
                        let full_name = format!("{class_name}::{}", method.name());
                        module_object.children.push(generate_function(context, method, &full_name)?);
                    }
                }
            }
            FileStatementAst::Interface(_) | FileStatementAst::Use(_) => {}
        }
    }

    let _ = module_location;
    Ok(module_object)
}

/// Lowers a module's import list (§4.G.5): one `LoadModule` per imported
/// module, then an attribute walk (`modules` → the qualified name → the
/// imported local name) binding the import's local name. The grammar allows
/// exactly one aliasable named-or-module import per `use` statement, so
/// there is no self/glob-import branch to lower here, only this single
/// per-entry sequence repeated for each recorded import.
fn generate_imports<'base>(context: &TirContext<'base>, module_object: &mut CodeObject, module_path: &str) {
    let module = context.modules.get(module_path).unwrap_or_else(|| panic!("Module not found, it is a bug: {module_path}"));
    let block = module_object.current_block();
    let dynamic = TypeLocation::UNDEFINED;

    for (local_name, _) in module.ast_imported_modules.iter() {
        let path_register = module_object.register(dynamic);
        module_object.instruct(block, Opcode::SetLiteral, Some(path_register), vec![], Some(Literal::String(local_name.to_string())), 0..0);

        let loaded = module_object.register(dynamic);
        module_object.instruct(block, Opcode::LoadModule, Some(loaded), vec![path_register], None, 0..0);

        let global = module_object.register(dynamic);
        module_object.instruct(block, Opcode::SetGlobal, Some(global), vec![loaded], Some(Literal::String(local_name.to_string())), 0..0);
    }
}

/// Generates one code object for a function or method body.
fn generate_function<'base>(context: &TirContext<'base>, function: &FunctionDefinitionAst<'base>, full_name: &str) -> Result<CodeObject, TirError> {
    let scope_location = *context.types_scope.get(full_name).unwrap_or_else(|| panic!("Scope not registered for {full_name}, it is a bug"));
    let signature = context.types.location(full_name).unwrap_or(TypeLocation::UNDEFINED);
    let void_type = context.types.location("void").unwrap_or(TypeLocation::UNDEFINED);

    let mut code = CodeObject::new(function.name.text.to_string(), signature, function.name.to_range());

    let mut generator = FunctionGenerator { context, scope_location, code: &mut code, void_type };
    generator.generate_body(&function.body)?;

    code.finalize(void_type, function.name.to_range());
    Ok(code)
}

/// Carries the state needed while lowering a single function body: the
/// context (read-only), the scope identifiers resolve against, and the code
/// object being written into.
struct FunctionGenerator<'ctx, 'base> {
    context: &'ctx TirContext<'base>,
    scope_location: ScopeLocation,
    code: &'ctx mut CodeObject,
    void_type: TypeLocation,
}

impl<'ctx, 'base> FunctionGenerator<'ctx, 'base> {
    fn scope(&self) -> &crate::tir::scope::Scope<'base> {
        self.context.get_scope(self.scope_location).expect("Scope not found, it is a bug")
    }

    fn generate_body(&mut self, body: &BodyAst<'base>) -> Result<(), TirError> {
        for statement in body.statements.iter() {
            self.generate_statement(statement)?;
        }
        Ok(())
    }

    fn generate_statement(&mut self, statement: &BodyStatementAst<'base>) -> Result<(), TirError> {
        match statement {
            BodyStatementAst::VariableDefinition(definition) => self.generate_variable_definition(definition),
            BodyStatementAst::VariableAssign(assign) => self.generate_variable_assign(assign),
            BodyStatementAst::FunctionCall(call) => self.generate_function_call(call).map(|_| ()),
            BodyStatementAst::IfCondition(if_condition) => self.generate_if_condition(if_condition),
        }
    }

    fn generate_variable_definition(&mut self, definition: &VariableDefinitionAst<'base>) -> Result<(), TirError> {
        let Some(expression) = &definition.expression else { return Ok(()) };
        let value = self.generate_expression(expression)?;
        self.store_local(&definition.name, value);
        Ok(())
    }

    fn generate_variable_assign(&mut self, assign: &VariableAssignAst<'base>) -> Result<(), TirError> {
        let value = self.generate_expression(&assign.expression)?;
        self.store_local(&assign.name, value);
        Ok(())
    }

    /// Emits `SetLocal`/`SetParentLocal` for `name`, resolving depth and slot
    /// the same way [`FunctionGenerator::load_local`] does for reads.
    fn store_local(&mut self, name: &Span<'base>, value: Register) {
        let (depth, symbol) = self.scope().lookup_with_parent(self.context, name.text);
        let block = self.code.current_block();

        match depth {
            -1 => {
                let index_register = self.literal_index(symbol.index(), name.to_range());
                self.code.instruct(block, Opcode::SetLocal, None, vec![index_register, value], None, name.to_range());
            }
            depth if depth > 0 => {
                let index_register = self.literal_index(symbol.index(), name.to_range());
                let depth_register = self.literal_index(depth, name.to_range());
                self.code.instruct(block, Opcode::SetParentLocal, None, vec![depth_register, index_register, value], None, name.to_range());
            }
            _ => {
                let global_register = self.literal_name(name.text, name.to_range());
                self.code.instruct(block, Opcode::SetGlobal, None, vec![global_register, value], None, name.to_range());
            }
        }
    }

    fn load_local(&mut self, name: &Span<'base>) -> Register {
        let (depth, symbol) = self.scope().lookup_with_parent(self.context, name.text);
        let block = self.code.current_block();
        let type_location = symbol.variable().map(|variable| variable.location).unwrap_or(TypeLocation::UNDEFINED);

        match depth {
            -1 => {
                let index_register = self.literal_index(symbol.index(), name.to_range());
                let destination = self.code.register(type_location);
                self.code.instruct(block, Opcode::GetLocal, Some(destination), vec![index_register], None, name.to_range());
                destination
            }
            depth if depth > 0 => {
                let index_register = self.literal_index(symbol.index(), name.to_range());
                let depth_register = self.literal_index(depth, name.to_range());
                let destination = self.code.register(type_location);
                self.code.instruct(block, Opcode::GetParentLocal, Some(destination), vec![depth_register, index_register], None, name.to_range());
                destination
            }
            _ => {
                let destination = self.code.register(type_location);
                self.code.instruct(block, Opcode::GetGlobal, Some(destination), vec![], Some(Literal::String(name.text.to_string())), name.to_range());
                destination
            }
        }
    }

    fn literal_index(&mut self, index: isize, location: Range<usize>) -> Register {
        let block = self.code.current_block();
        let destination = self.code.register(TypeLocation::UNDEFINED);
        self.code.instruct(block, Opcode::SetLiteral, Some(destination), vec![], Some(Literal::Integer(index as i64)), location);
        destination
    }

    fn literal_name(&mut self, name: &str, location: Range<usize>) -> Register {
        let block = self.code.current_block();
        let destination = self.code.register(TypeLocation::UNDEFINED);
        self.code.instruct(block, Opcode::SetLiteral, Some(destination), vec![], Some(Literal::String(name.to_string())), location);
        destination
    }

    fn generate_expression(&mut self, expression: &ExpressionAst<'base>) -> Result<Register, TirError> {
        match expression {
            ExpressionAst::Primitive { span, value } => Ok(self.generate_primitive(value, span)),
            ExpressionAst::Ident(name) => Ok(self.load_local(name)),
            ExpressionAst::Ref(reference) => self.generate_ref(reference),
            ExpressionAst::Not(inner) => {
                let inner_register = self.generate_expression(inner)?;
                let block = self.code.current_block();
                let bool_type = self.context.types.location("bool").unwrap_or(TypeLocation::UNDEFINED);
                let destination = self.code.register(bool_type);
                self.code.instruct(block, Opcode::Not, Some(destination), vec![inner_register], None, 0..0);
                Ok(destination)
            }
            ExpressionAst::FunctionCall(call) => self.generate_function_call(call),
            ExpressionAst::Operation { left, operator, right } => {
                let left_register = self.generate_expression(left)?;
                let right_register = self.generate_expression(right)?;
                let block = self.code.current_block();
                let result_type = self.code.register_table.type_of(left_register);
                let destination = self.code.register(result_type);
                self.code.instruct(block, Opcode::from_operator(*operator), Some(destination), vec![left_register, right_register], None, 0..0);
                Ok(destination)
            }
        }
    }

    fn generate_primitive(&mut self, value: &PrimitiveValue<'base>, span: &Span<'base>) -> Register {
        let type_location = self.context.types.find_by_value(&TypeValue::PrimitiveType(value.to_type())).unwrap_or(TypeLocation::UNDEFINED);
        let literal = match value {
            PrimitiveValue::String(text) => Literal::String(text.to_string()),
            PrimitiveValue::Bool(value) => Literal::Bool(*value),
            PrimitiveValue::I8(value) => Literal::Integer(*value as i64),
            PrimitiveValue::U8(value) => Literal::Integer(*value as i64),
            PrimitiveValue::I16(value) => Literal::Integer(*value as i64),
            PrimitiveValue::U16(value) => Literal::Integer(*value as i64),
            PrimitiveValue::I32(value) => Literal::Integer(*value as i64),
            PrimitiveValue::U32(value) => Literal::Integer(*value as i64),
            PrimitiveValue::I64(value) => Literal::Integer(*value),
            PrimitiveValue::U64(value) => Literal::Integer(*value as i64),
            PrimitiveValue::Float(value, _) => Literal::Float(*value),
            PrimitiveValue::Double(value, _) => Literal::Float(*value),
        };

        let block = self.code.current_block();
        let destination = self.code.register(type_location);
        self.code.instruct(block, Opcode::SetLiteral, Some(destination), vec![], Some(literal), span.to_range());
        destination
    }

    /// Lowers a property-access chain (`obj.field.subfield`): the head
    /// resolves as a local, every following segment is an attribute get off
    /// the previous register.
    fn generate_ref(&mut self, reference: &crate::ast::RefAst<'base>) -> Result<Register, TirError> {
        let mut current = self.load_local(&reference.names[0]);
        for segment in reference.names.iter().skip(1) {
            current = self.generate_attribute_get(current, segment);
        }
        Ok(current)
    }

    fn generate_attribute_get(&mut self, receiver: Register, name: &Span<'base>) -> Register {
        let receiver_type = self.code.register_table.type_of(receiver);
        let (member_type, _) = self.resolve_member(receiver_type, name.text);

        let block = self.code.current_block();
        let destination = self.code.register(member_type);
        self.code.instruct(block, Opcode::GetAttribute, Some(destination), vec![receiver], Some(Literal::String(name.text.to_string())), name.to_range());
        destination
    }

    /// Resolves `name` on `receiver_type` exactly as the resolver's member
    /// lookup does: a direct field/method hit first, then (when the
    /// receiver implements the unknown-message protocol) a fallback to its
    /// `unknown_message` method. Returns the resolved type together with
    /// whether the fallback fired, so call sites can pick the matching
    /// dispatch form.
    fn resolve_member(&self, receiver_type: TypeLocation, name: &str) -> (TypeLocation, bool) {
        let Some(signature) = self.context.types.get_from_location(receiver_type) else {
            return (TypeLocation::UNDEFINED, false);
        };

        if let Some(location) = signature.value.lookup_method(self.context, name) {
            return (location, false);
        }

        if signature.value.guard_unknown_message(self.context, name) {
            if let Some(location) = signature.value.lookup_method(self.context, "unknown_message") {
                return (location, true);
            }
        }

        (TypeLocation::UNDEFINED, false)
    }

    /// Lowers a send (§4.G.3). Argument-count and keyword-name validation
    /// already ran during the resolve/finish passes; this only performs the
    /// emission the resolved call describes. The unknown-message guard was
    /// already decided statically by the resolver (the receiver's type is
    /// known here, not just at runtime), so generation picks the matching
    /// emission form directly instead of emitting both and branching on it.
    fn generate_function_call(&mut self, call: &FunctionCallAst<'base>) -> Result<Register, TirError> {
        let path = call.path.get_path();
        let is_this = call.path.is_this();

        let (mut receiver, mut current) = if is_this {
            let self_register = self.load_local(&Span { text: "this", position: 0..0, state: path[0].state.clone() });
            (Some(self_register), self_register)
        } else {
            (None, self.load_local(&path[0]))
        };

        let message_segments: &[Span<'base>] = if is_this { &path[..] } else { &path[1..] };
        let mut fallback_message: Option<&Span<'base>> = None;

        for (index, segment) in message_segments.iter().enumerate() {
            let receiver_type = self.code.register_table.type_of(current);
            let (member_type, is_fallback) = self.resolve_member(receiver_type, segment.text);
            let is_last = index == message_segments.len() - 1;

            if is_last && is_fallback {
                fallback_message = Some(segment);
            }

            let block = self.code.current_block();
            let destination = self.code.register(member_type);
            let emitted_name = if is_last && is_fallback { "unknown_message" } else { segment.text };
            self.code.instruct(block, Opcode::GetAttribute, Some(destination), vec![current], Some(Literal::String(emitted_name.to_string())), segment.to_range());

            receiver = Some(current);
            current = destination;
        }

        let argument_registers = call
            .arguments
            .iter()
            .map(|argument| self.generate_expression(argument))
            .collect::<Result<Vec<_>, _>>()?;

        let current_type = self.code.register_table.type_of(current);
        let return_type = self
            .context
            .types
            .get_from_location(current_type)
            .map(|signature| match signature.value.as_ref() {
                TypeValue::Function(function) => function.return_type,
                TypeValue::InterfaceFunction(function) => function.return_type,
                _ => self.void_type,
            })
            .unwrap_or(self.void_type);

        let block = self.code.current_block();
        let destination = self.code.register(return_type);

        let mut operands = vec![current];
        operands.extend(receiver);

        if let Some(message) = fallback_message {
            let message_register = self.literal_name(message.text, message.to_range());
            let array_register = self.code.register(TypeLocation::UNDEFINED);
            let array_block = self.code.current_block();
            self.code.instruct(array_block, Opcode::SetArray, Some(array_register), argument_registers, None, call.call_span.to_range());
            operands.push(message_register);
            operands.push(array_register);
        } else {
            operands.extend(argument_registers);
        }

        self.code.instruct(block, Opcode::RunBlock, Some(destination), operands, None, call.call_span.to_range());
        Ok(destination)
    }

    /// Lowers `if`/`else if`/`else` into a `GotoNextBlockIfTrue`/`SkipNextBlock`
    /// pair per branch: the condition block falls through into the `then`
    /// block on true and skips it (landing on the block right after) on
    /// false; the `then` block, once generated, skips the `else` block so
    /// both paths merge at the connected continuation block.
    fn generate_if_condition(&mut self, if_condition: &IfConditionAst<'base>) -> Result<(), TirError> {
        let condition = self.generate_expression(&if_condition.expression)?;
        let condition_block = self.code.current_block();
        self.code.instruct(condition_block, Opcode::GotoNextBlockIfTrue, None, vec![condition], None, 0..0);

        let then_block = self.code.add_connected_basic_block();
        self.code.mark_reachable(then_block + 1);
        self.generate_body(&if_condition.true_body)?;
        if !self.code.blocks[self.code.current_block()].is_terminated() {
            self.code.instruct(self.code.current_block(), Opcode::SkipNextBlock, None, vec![], None, 0..0);
        }

        self.code.add_basic_block();

        for (condition, body) in if_condition.else_ifs.iter() {
            let condition_register = self.generate_expression(condition)?;
            let condition_block = self.code.current_block();
            self.code.instruct(condition_block, Opcode::GotoNextBlockIfTrue, None, vec![condition_register], None, 0..0);

            let then_block = self.code.add_connected_basic_block();
            self.code.mark_reachable(then_block + 1);
            self.generate_body(body)?;
            if !self.code.blocks[self.code.current_block()].is_terminated() {
                self.code.instruct(self.code.current_block(), Opcode::SkipNextBlock, None, vec![], None, 0..0);
            }

            self.code.add_basic_block();
        }

        if let Some(false_body) = &if_condition.false_body {
            self.generate_body(false_body)?;
        }

        self.code.add_connected_basic_block();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{file::SourceFile, nom_tools::State, process_code, tir::TirError};

    use super::{generate_module, Opcode};

    #[test]
    fn generates_module_imports_block() -> Result<(), TirError> {
        let state_1 = State::new(SourceFile::new(vec!["lib".into()], " pub class testclass1 {} ".to_string()));
        let state_2 = State::new(SourceFile::new(vec!["main".into()], r#"use lib.testclass1 as test;
func main(a: test): test {}"#.to_string()));

        let source_1 = process_code(&state_1)?;
        let source_2 = process_code(&state_2)?;

        let context = crate::process_ast(vec![source_2.into(), source_1.into()])?;
        let module_object = generate_module(&context, "main").unwrap();

        let import_instructions = &module_object.blocks[0].instructions;
        assert!(import_instructions.iter().any(|instruction| instruction.opcode == Opcode::LoadModule));
        assert!(import_instructions.iter().any(|instruction| instruction.opcode == Opcode::SetGlobal));
        Ok(())
    }

    #[test]
    fn generates_function_body_with_locals_and_return() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
func test(): string {
    var a = "hello";
    a = "world";
}
"#.to_string()));
        let ast = process_code(&state)?;
        let context = crate::tir::build(vec![ast.into()]).unwrap();
        let module_object = generate_module(&context, "source").unwrap();

        let function = module_object.children.iter().find(|child| child.name == "test").unwrap();
        let all_opcodes = function.blocks.iter().flat_map(|block| block.instructions.iter().map(|instruction| instruction.opcode)).collect::<Vec<_>>();

        assert!(all_opcodes.contains(&Opcode::SetLocal));
        assert_eq!(all_opcodes.last(), Some(&Opcode::Return));
        Ok(())
    }

    #[test]
    fn generates_if_condition_branch_blocks() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
func test(): string {
    var a = "hello";
    if (a) {
        a = "true-branch";
    } else {
        a = "else-branch";
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let context = crate::tir::build(vec![ast.into()]).unwrap();
        let module_object = generate_module(&context, "source").unwrap();

        let function = module_object.children.iter().find(|child| child.name == "test").unwrap();
        assert!(function.blocks.len() >= 4);
        assert!(function.blocks[0].instructions.iter().any(|instruction| instruction.opcode == Opcode::GotoNextBlockIfTrue));
        Ok(())
    }

    #[test]
    fn generates_method_call_on_this() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc();
    }

    func abc(): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let context = crate::tir::build(vec![ast.into()]).unwrap();
        let module_object = generate_module(&context, "source").unwrap();

        let method = module_object.children.iter().find(|child| child.name == "init").unwrap();
        let all_opcodes = method.blocks.iter().flat_map(|block| block.instructions.iter().map(|instruction| instruction.opcode)).collect::<Vec<_>>();

        assert!(all_opcodes.contains(&Opcode::GetAttribute));
        assert!(all_opcodes.contains(&Opcode::RunBlock));
        Ok(())
    }

    #[test]
    fn generates_unknown_message_fallback_dispatch() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
interface IDynamic {
    func unknown_message(): string;
}

extend TestClass: IDynamic {
    func unknown_message(): string {

    }
}

class TestClass {
    func init(this): string {
        this.does_not_exist();
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let context = crate::tir::build(vec![ast.into()]).unwrap();
        let module_object = generate_module(&context, "source").unwrap();

        let method = module_object.children.iter().find(|child| child.name == "init").unwrap();
        let attribute_names = method.blocks.iter().flat_map(|block| &block.instructions).filter_map(|instruction| match (&instruction.opcode, &instruction.literal) {
            (Opcode::GetAttribute, Some(super::Literal::String(name))) => Some(name.clone()),
            _ => None,
        }).collect::<Vec<_>>();

        assert!(attribute_names.contains(&"unknown_message".to_string()));
        Ok(())
    }
}

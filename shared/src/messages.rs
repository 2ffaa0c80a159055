//! 界面提示文案
//!
//! 每个调用点在后端没有返回可读消息时使用的默认文案。

pub const LOGIN_FAILED: &str = "Email ou senha inválidos.";
pub const PASSWORD_MISMATCH: &str = "As senhas não conferem.";
pub const REGISTER_FAILED: &str = "Erro ao tentar registrar. Verifique os dados.";
pub const COURSES_LOAD_FAILED: &str = "Falha ao carregar cursos.";
pub const EMPTY_SELECTION: &str = "Você deve selecionar ao menos um curso.";
pub const ENROLL_FAILED: &str = "Erro ao realizar matrícula.";
pub const SESSION_MISSING: &str = "Sessão expirada. Faça login novamente.";
pub const NO_ENROLLMENTS: &str = "Você não está matriculado em nenhum curso este semestre.";
pub const ENROLLMENTS_LOAD_FAILED: &str = "Erro ao buscar suas matrículas.";
pub const CANCEL_CONFIRM_PROMPT: &str = "Você tem certeza que quer cancelar esta matrícula?";
pub const CANCEL_FAILED: &str = "Erro ao cancelar matrícula.";
pub const ANONYMOUS_USER: &str = "Usuário";

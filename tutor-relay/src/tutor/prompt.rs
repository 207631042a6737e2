//! Instruction prompt sent to the generative backend.

/// Marker replaced by the user's message.
const USER_TEXT_PLACEHOLDER: &str = "{user_text}";

/// Fixed tutor instructions.
///
/// The persona is an English tutor from Taiwan who answers in the learner's
/// own language. The backend must answer with a bare `{"reply": "..."}` object.
pub const TUTOR_PROMPT_TEMPLATE: &str = r#"你是一位來自台灣的線上英文家教，請使用學生的母語（預設為繁體中文）回覆。你的任務是：

1. 針對學生的一般英文問題，給予清楚的說明與教學。
2. 若學生詢問單字，提供 KK 音標、中文翻譯、一個同義字，以及一個例句。
3. 若學生詢問文法，給予詳細的解釋。
4. 若學生詢問英文作文如何寫，給予寫作教學與具體回饋。

請嚴格按照下面格式輸出純 JSON，前後不要有任何多餘文字：
{"reply": "這裡放你的回覆……"}

學生問題：{user_text}"#;

/// A fully rendered prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest(String);

impl PromptRequest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render the tutor template around `user_text`.
///
/// The text is inserted verbatim; placeholders inside it are left alone.
pub fn build_prompt(user_text: &str) -> PromptRequest {
    PromptRequest(TUTOR_PROMPT_TEMPLATE.replacen(USER_TEXT_PLACEHOLDER, user_text, 1))
}

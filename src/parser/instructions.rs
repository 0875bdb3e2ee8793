//! Shared-instruction extraction.

use regex::Regex;

use crate::model::Instruction;

/// Widest question range an instruction may cover.
pub const MAX_INSTRUCTION_SPAN: u32 = 1000;

/// Finds `※ ... (start∼end)` instructions in document text.
///
/// The range separator may be `∼` (U+223C), `~`, or `～`. A range wider than
/// [`MAX_INSTRUCTION_SPAN`] is a misread and the instruction is skipped.
pub struct InstructionExtractor {
    pattern: Regex,
}

impl InstructionExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"※\s*([^(]+)\(([0-9]+)[∼~～]([0-9]+)\)").unwrap(),
        }
    }

    /// Extract every instruction, in text order.
    pub fn extract(&self, text: &str) -> Vec<Instruction> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let start: u32 = caps[2].parse().ok()?;
                let end: u32 = caps[3].parse().ok()?;
                if end.saturating_sub(start) >= MAX_INSTRUCTION_SPAN {
                    log::warn!(
                        "Skipping common instruction with implausible range {}~{}",
                        start,
                        end
                    );
                    return None;
                }
                let instruction = Instruction::new(&caps[0], caps[1].trim(), start, end);
                log::info!("Common instruction: questions {}~{}", start, end);
                Some(instruction)
            })
            .collect()
    }
}

impl Default for InstructionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract every shared instruction from document text.
pub fn extract_instructions(text: &str) -> Vec<Instruction> {
    InstructionExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_instruction() {
        let text = "4. 앞 문제\n※ 다음을 읽고 답하시오.(5∼7)\n5. 질문";
        let instructions = extract_instructions(text);
        assert_eq!(instructions.len(), 1);

        let inst = &instructions[0];
        assert_eq!(inst.text, "※ 다음을 읽고 답하시오.(5∼7)");
        assert_eq!(inst.content, "다음을 읽고 답하시오.");
        assert_eq!(inst.start, 5);
        assert_eq!(inst.end, 7);
        assert_eq!(inst.questions, vec![5, 6, 7]);
    }

    #[test]
    fn test_multiple_instructions_in_order() {
        let text = "※ 첫 설명 (1~2)\n본문\n※ 둘째 설명\n이어짐 (10～12)";
        let instructions = extract_instructions(text);
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].content, "첫 설명");
        assert_eq!(instructions[1].content, "둘째 설명\n이어짐");
        assert_eq!(instructions[1].questions, vec![10, 11, 12]);
    }

    #[test]
    fn test_oversized_range_is_skipped() {
        let text = "※ 깨진 설명 (1∼50000000)\n※ 정상 설명 (3∼4)\n※ 넘치는 설명 (1∼99999999999)";
        let instructions = extract_instructions(text);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].content, "정상 설명");
        assert_eq!(instructions[0].questions, vec![3, 4]);
    }

    #[test]
    fn test_widest_allowed_range() {
        let instructions = extract_instructions("※ 설명 (1∼1000)");
        assert_eq!(instructions[0].questions.len(), 1000);
        assert!(extract_instructions("※ 설명 (1∼1001)").is_empty());
    }

    #[test]
    fn test_no_range_no_instruction() {
        assert!(extract_instructions("※ 범위 없는 설명").is_empty());
        assert!(extract_instructions("※ 괄호 (가) 설명 (3∼4)").is_empty());
    }
}

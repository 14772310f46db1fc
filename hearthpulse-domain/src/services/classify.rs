use crate::entities::Category;

/// Categorize a blood pressure measurement.
///
/// Rules are evaluated top to bottom in descending severity and the first
/// match wins, so when systolic and diastolic disagree the more severe
/// category is returned. Total over all integer inputs: out-of-range values
/// classify by the same arithmetic, there is no rejection path.
pub fn classify(systolic: i32, diastolic: i32) -> Category {
    if systolic > 180 || diastolic > 120 {
        Category::Crisis
    } else if systolic >= 140 || diastolic >= 90 {
        Category::Stage2
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        Category::Stage1
    } else if (120..=129).contains(&systolic) && diastolic < 80 {
        Category::Elevated
    } else {
        Category::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_range() {
        assert_eq!(classify(110, 75), Category::Normal);
        assert_eq!(classify(119, 79), Category::Normal);
    }

    #[test]
    fn elevated_requires_both_conditions() {
        assert_eq!(classify(125, 75), Category::Elevated);
        assert_eq!(classify(129, 79), Category::Elevated);
        // Diastolic at 80 escalates to stage 1 instead
        assert_eq!(classify(125, 80), Category::Stage1);
    }

    #[test]
    fn stage1_boundaries() {
        assert_eq!(classify(130, 75), Category::Stage1);
        assert_eq!(classify(139, 79), Category::Stage1);
        assert_eq!(classify(110, 85), Category::Stage1);
    }

    #[test]
    fn stage2_boundaries() {
        assert_eq!(classify(140, 79), Category::Stage2);
        assert_eq!(classify(179, 80), Category::Stage2);
        assert_eq!(classify(110, 90), Category::Stage2);
        // 180/120 are stage 2: crisis requires strictly greater
        assert_eq!(classify(180, 120), Category::Stage2);
    }

    #[test]
    fn crisis_on_either_measurement() {
        assert_eq!(classify(181, 0), Category::Crisis);
        assert_eq!(classify(0, 121), Category::Crisis);
        assert_eq!(classify(185, 70), Category::Crisis);
    }

    #[test]
    fn severity_tie_break_favors_the_worse_measurement() {
        // Systolic in the normal range, diastolic in stage 2 territory
        assert_eq!(classify(105, 95), Category::Stage2);
    }

    #[test]
    fn total_over_out_of_range_inputs() {
        assert_eq!(classify(-10, -5), Category::Normal);
        assert_eq!(classify(0, 0), Category::Normal);
        assert_eq!(classify(i32::MAX, i32::MIN), Category::Crisis);
    }

    #[test]
    fn classification_is_pure() {
        assert_eq!(classify(133, 82), classify(133, 82));
    }
}

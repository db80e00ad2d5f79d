use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Coding,
    Concept,
    Debugging,
}

/// One curriculum exercise. Immutable reference data; nothing in the service
/// ever writes to a task.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<&'static str>,
    pub points: i64,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<&'static str>,
    pub hints: &'static [&'static str],
}

/// Ordered task list for one module. Definition order is the order clients
/// see, so listing stays deterministic.
pub struct Catalog {
    pub module: &'static str,
    pub track: &'static str,
    tasks: Vec<Task>,
}

impl Catalog {
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// The DSA Arrays module: five coding exercises, two concept questions
    /// and one debugging drill.
    pub fn arrays_module() -> Self {
        Self {
            module: "Arrays",
            track: "DSA",
            tasks: vec![
                Task {
                    id: "arr-001",
                    title: "Two Sum",
                    difficulty: Some("Easy"),
                    points: 10,
                    kind: TaskKind::Coding,
                    description: "Given an array of integers and a target sum, return the \
                        indices of two numbers that add up to the target. Only one valid \
                        answer exists. Start with the brute force, then think about what a \
                        hash map buys you.",
                    starter_code: Some(
                        "def two_sum(nums, target):\n    # Your code here\n    pass\n\n\
                         print(two_sum([2, 7, 11, 15], 9))  # Expected: [0, 1]\n",
                    ),
                    hints: &[
                        "Start with the simplest approach: check every pair",
                        "A hash map can help you find complements in O(1)",
                        "Think about what you need to store as you iterate",
                    ],
                },
                Task {
                    id: "arr-002",
                    title: "Maximum Subarray",
                    difficulty: Some("Medium"),
                    points: 20,
                    kind: TaskKind::Coding,
                    description: "Find the contiguous subarray with the largest sum and \
                        return that sum. At each position decide whether to extend the \
                        previous subarray or start fresh (Kadane's algorithm).",
                    starter_code: Some(
                        "def max_subarray(nums):\n    # Your code here\n    pass\n\n\
                         print(max_subarray([-2, 1, -3, 4, -1, 2, 1, -5, 4]))  # Expected: 6\n",
                    ),
                    hints: &[
                        "At each element, you have two choices: start fresh or continue",
                        "Track the best ending at current position",
                        "The answer is the maximum of all 'best endings'",
                    ],
                },
                Task {
                    id: "arr-003",
                    title: "Rotate Array",
                    difficulty: Some("Medium"),
                    points: 20,
                    kind: TaskKind::Coding,
                    description: "Rotate an array to the right by k steps, in place. Handle \
                        k larger than the array length and aim for O(1) extra space. The \
                        reverse trick is elegant.",
                    starter_code: Some(
                        "def rotate(nums, k):\n    # Your code here - modify nums in-place\n    pass\n\n\
                         arr = [1, 2, 3, 4, 5, 6, 7]\nrotate(arr, 3)\nprint(arr)  # Expected: [5, 6, 7, 1, 2, 3, 4]\n",
                    ),
                    hints: &[
                        "k = k % len(nums) handles large k values",
                        "Try reversing: whole array, then first k, then rest",
                        "Three reverses = one rotation!",
                    ],
                },
                Task {
                    id: "arr-004",
                    title: "Contains Duplicate",
                    difficulty: Some("Easy"),
                    points: 10,
                    kind: TaskKind::Coding,
                    description: "Return True if any value appears at least twice in the \
                        array, False otherwise. Sets have O(1) lookup; what is the \
                        time/space trade-off?",
                    starter_code: Some(
                        "def contains_duplicate(nums):\n    # Your code here\n    pass\n\n\
                         print(contains_duplicate([1, 2, 3, 1]))  # Expected: True\n",
                    ),
                    hints: &[
                        "A set only keeps unique values",
                        "If set size != array size, there are duplicates",
                        "Or check while building the set",
                    ],
                },
                Task {
                    id: "arr-005",
                    title: "Product of Array Except Self",
                    difficulty: Some("Medium"),
                    points: 25,
                    kind: TaskKind::Coding,
                    description: "Return an array where each element is the product of all \
                        other elements, without division and in O(n) time. Prefix and \
                        suffix products are the key.",
                    starter_code: Some(
                        "def product_except_self(nums):\n    # Your code here - no division allowed!\n    pass\n\n\
                         print(product_except_self([1, 2, 3, 4]))  # Expected: [24, 12, 8, 6]\n",
                    ),
                    hints: &[
                        "Think about prefix products (products from left)",
                        "Think about suffix products (products from right)",
                        "Each answer = prefix[i-1] x suffix[i+1]",
                    ],
                },
                Task {
                    id: "concept-001",
                    title: "Explain Array Traversal",
                    difficulty: None,
                    points: 5,
                    kind: TaskKind::Concept,
                    description: "In your own words, explain what array traversal means and \
                        when you'd use it. Give a real-world analogy.",
                    starter_code: None,
                    hints: &["Think about going through a list of items one by one..."],
                },
                Task {
                    id: "concept-002",
                    title: "Time Complexity Analysis",
                    difficulty: None,
                    points: 5,
                    kind: TaskKind::Concept,
                    description: "Explain the difference between O(n) and O(n^2) time \
                        complexity using array operations as examples.",
                    starter_code: None,
                    hints: &["Compare a single loop vs nested loops..."],
                },
                Task {
                    id: "debug-001",
                    title: "Fix the Reverse Function",
                    difficulty: None,
                    points: 15,
                    kind: TaskKind::Debugging,
                    description: "This function should reverse an array in-place, but it \
                        has two bugs: the right pointer starts out of bounds and never \
                        moves. Find and fix them. reverse_array([1, 2, 3, 4, 5]) should \
                        return [5, 4, 3, 2, 1].",
                    starter_code: Some(
                        "def reverse_array(arr):\n    left = 0\n    right = len(arr)\n    \
                         while left < right:\n        arr[left], arr[right] = arr[right], arr[left]\n        \
                         left += 1\n    return arr\n\nprint(reverse_array([1, 2, 3, 4, 5]))\n",
                    ),
                    hints: &[
                        "Array indices go from 0 to len-1",
                        "Both pointers need to move",
                    ],
                },
            ],
        }
    }
}

// 呈現層：把搜尋結果轉成表格、JSON 或 CSV。

pub mod report;
